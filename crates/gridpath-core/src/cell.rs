//! The [`Cell`] type and its [`Role`].

use crate::geom::Point;

/// The single, mutually exclusive state of a [`Cell`].
///
/// User edits (`Barrier`, `Start`, `End`) and search bookkeeping (`Open`,
/// `Closed`, `Path`) share one tag so a cell is always in exactly one role.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// In the search frontier.
    Open,
    /// Settled by the search.
    Closed,
    /// Part of the reconstructed path.
    Path,
}

impl Role {
    /// Roles written by a search run rather than by the user.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// A grid position with a role and its last computed adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    role: Role,
    neighbors: Vec<Point>,
}

impl Cell {
    /// A fresh empty cell with no neighbors.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            role: Role::Empty,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Set the role unconditionally.
    #[inline]
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Whether a search may step onto this cell.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        self.role != Role::Barrier
    }

    /// `(row, col)` of this cell.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.pos.row(), self.pos.col())
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Neighbors as of the last [`Grid::recompute_adjacency`](crate::Grid::recompute_adjacency).
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Point>) {
        self.neighbors = neighbors;
    }
}
