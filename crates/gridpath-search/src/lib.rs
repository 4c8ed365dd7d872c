//! Step-by-step shortest-path search for the gridpath grid.
//!
//! - **Uniform-cost search** ([`run`]) — Dijkstra with unit edge weights,
//!   driven through a priority frontier and reporting every expansion to a
//!   [`View`](gridpath_core::View) so the caller can redraw or stop.
//! - **BFS** reference distances ([`bfs_distances`], [`bfs_distance`]).
//!
//! All search state lives for one call; the only lasting effect of a run is
//! the roles it writes into the grid.

mod bfs;
mod dijkstra;
mod outcome;
mod state;

pub use bfs::{bfs_distance, bfs_distances};
pub use dijkstra::run;
pub use outcome::{Outcome, Report, SearchStats};
pub use state::UNREACHABLE;
