//! **gridpath-core** — cells, grid and input plumbing for the interactive
//! grid pathfinder.
//!
//! This crate provides the types shared across the *gridpath* workspace:
//! geometry primitives, role-tagged cells, the fixed-size grid with its
//! adjacency, raw and semantic input events, and the single-threaded
//! application loop that hands a redraw hook to the model.

pub mod app;
pub mod cell;
pub mod config;
pub mod error;
pub mod events;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod script;

pub use app::{App, AppConfig, Context, Driver, Model, View};
pub use cell::{Cell, Role};
pub use config::GridConfig;
pub use error::GridError;
pub use events::{Event, Keymap};
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid};
pub use messages::*;
pub use script::ScriptDriver;
