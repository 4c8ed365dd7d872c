use gridpath_core::{Grid, GridError, Point, Role, View};

use crate::outcome::{Outcome, Report, SearchStats};
use crate::state::SearchState;

/// Uniform-cost search (Dijkstra with unit edge weights) from `start` to
/// `end`, writing progress into `grid`'s roles.
///
/// Uses the adjacency from the last [`Grid::recompute_adjacency`]. After
/// each expansion the expanded cell is [`Role::Closed`] (unless it is the
/// start), newly queued cells are [`Role::Open`] (unless it is the end) and
/// `view` is stepped. On reaching the end, the cells between start and end
/// become [`Role::Path`], the start is re-marked [`Role::Start`], and `view`
/// is stepped once more.
///
/// A `Break` from `view` stops the run with [`Outcome::Aborted`], leaving
/// the grid as it was at that step.
///
/// # Errors
///
/// [`GridError::OutOfRange`] if `start` or `end` is outside the grid.
pub fn run<V: View + ?Sized>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    view: &mut V,
) -> Result<Report, GridError> {
    let si = grid.checked_index(start)?;
    let ei = grid.checked_index(end)?;

    let mut st = SearchState::new(grid.len());
    let mut stats = SearchStats::default();
    st.seed(si);
    stats.pushed += 1;

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);

    while let Some(current) = st.pop() {
        let ci = current.idx;
        // A duplicate entry for a cell settled earlier.
        if st.settled[ci] {
            continue;
        }
        st.settled[ci] = true;
        stats.settled += 1;

        if ci == ei {
            let path = mark_path(grid, &st, si, ei);
            grid.set_role(start, Role::Start);
            stats.steps += 1;
            let outcome = if view.step(grid).is_break() {
                Outcome::Aborted
            } else {
                Outcome::Found(path)
            };
            return Ok(Report { outcome, stats });
        }

        let cp = grid.point(ci);
        if ci != si {
            grid.set_role(cp, Role::Closed);
        }

        nbuf.clear();
        if let Some(cell) = grid.at(cp) {
            nbuf.extend_from_slice(cell.neighbors());
        }

        let candidate = st.dist[ci] + 1;
        for &np in &nbuf {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if candidate >= st.dist[ni] {
                continue;
            }
            st.parent[ni] = Some(ci);
            st.dist[ni] = candidate;
            if !st.present[ni] {
                st.push(ni, candidate);
                stats.pushed += 1;
                if ni != ei {
                    grid.set_role(np, Role::Open);
                }
            }
        }

        stats.steps += 1;
        log::trace!("expanded {cp} at distance {}", st.dist[ci]);
        if view.step(grid).is_break() {
            return Ok(Report {
                outcome: Outcome::Aborted,
                stats,
            });
        }
    }

    Ok(Report {
        outcome: Outcome::Exhausted,
        stats,
    })
}

/// Walk predecessors from `ei` back to `si`, marking the cells strictly
/// between them as [`Role::Path`]. Returns the path from start to end.
fn mark_path(grid: &mut Grid, st: &SearchState, si: usize, ei: usize) -> Vec<Point> {
    let mut path = vec![grid.point(ei)];
    let mut cur = ei;
    while let Some(prev) = st.parent[cur] {
        let p = grid.point(prev);
        if prev != si {
            grid.set_role(p, Role::Path);
        }
        path.push(p);
        cur = prev;
    }
    path.reverse();
    path
}
