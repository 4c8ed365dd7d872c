use std::collections::VecDeque;

use gridpath_core::{Grid, Point};

use crate::state::UNREACHABLE;

/// Breadth-first distance map from `source`, indexed like the grid.
///
/// Walks orthogonal moves between traversable cells directly, without the
/// cached adjacency, so it serves as an independent reference for [`run`](crate::run).
/// Unreached cells (and every cell, if `source` is out of bounds) hold
/// [`UNREACHABLE`].
pub fn bfs_distances(grid: &Grid, source: Point) -> Vec<i32> {
    let mut dist = vec![UNREACHABLE; grid.len()];
    let Some(si) = grid.index(source) else {
        return dist;
    };
    dist[si] = 0;

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(si);

    while let Some(ci) = queue.pop_front() {
        let current_dist = dist[ci];
        for np in grid.point(ci).neighbors_4() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            if !grid.at(np).is_some_and(|c| c.is_traversable()) {
                continue;
            }
            dist[ni] = current_dist + 1;
            queue.push_back(ni);
        }
    }

    dist
}

/// Number of orthogonal moves from `from` to `to`, if reachable.
pub fn bfs_distance(grid: &Grid, from: Point, to: Point) -> Option<i32> {
    let ti = grid.index(to)?;
    let d = bfs_distances(grid, from)[ti];
    (d != UNREACHABLE).then_some(d)
}
