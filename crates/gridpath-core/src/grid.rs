//! The [`Grid`] type — a fixed `rows × cols` collection of [`Cell`]s — and
//! the role [`Frame`]s sent to drivers.

use crate::cell::{Cell, Role};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of cells indexed by `(row, col)`.
///
/// Dimensions are fixed at construction. [`reset`](Grid::reset) replaces every
/// cell with a fresh empty one of the same geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cell_size: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell [`Role::Empty`] and no adjacency.
    ///
    /// Negative dimensions are clamped to zero and `cell_size` to at least 1.
    pub fn new(rows: i32, cols: i32, cell_size: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cell_size: cell_size.max(1),
            cells: fresh_cells(rows, cols),
        }
    }

    /// Create a grid from a (validated) configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.rows, config.cols, config.cell_size)
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// The range of valid positions (`x` = column, `y` = row).
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Whether `p` is a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.cols as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Flat index of `p`, or [`GridError::OutOfRange`].
    #[inline]
    pub fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or_else(|| self.out_of_range(p))
    }

    /// Position of a flat index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let cols = self.cols.max(1) as usize;
        Point::new((idx % cols) as i32, (idx / cols) as i32)
    }

    /// The cell at `(row, col)`.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, GridError> {
        let i = self.checked_index(Point::at(row, col))?;
        Ok(&self.cells[i])
    }

    /// Mutable access to the cell at `(row, col)`.
    pub fn cell_at_mut(&mut self, row: i32, col: i32) -> Result<&mut Cell, GridError> {
        let i = self.checked_index(Point::at(row, col))?;
        Ok(&mut self.cells[i])
    }

    /// The cell at `p`, if in bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Role of the cell at `p`, if in bounds.
    #[inline]
    pub fn role(&self, p: Point) -> Option<Role> {
        self.at(p).map(Cell::role)
    }

    /// Set the role of the cell at `p`. Out-of-bounds positions are ignored.
    #[inline]
    pub fn set_role(&mut self, p: Point, role: Role) {
        if let Some(c) = self.at_mut(p) {
            c.set_role(role);
        }
    }

    /// Map a device point to `(row, col)` by integer division by the cell
    /// size. No bounds check: the result may lie outside the grid.
    ///
    /// Division floors, so negative device coordinates land on negative
    /// indices rather than on row or column 0.
    #[inline]
    pub fn map_point_to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        (y.div_euclid(self.cell_size), x.div_euclid(self.cell_size))
    }

    /// Map a device point to a cell position, rejecting points that fall
    /// outside the grid.
    pub fn cell_for_point(&self, device: Point) -> Result<Point, GridError> {
        let (row, col) = self.map_point_to_cell(device.x, device.y);
        let p = Point::at(row, col);
        if self.contains(p) {
            Ok(p)
        } else {
            Err(self.out_of_range(p))
        }
    }

    /// Rebuild every cell's neighbor list: the in-bounds orthogonal cells
    /// that are currently traversable.
    ///
    /// Barrier edits since the last call are not reflected until this runs
    /// again.
    pub fn recompute_adjacency(&mut self) {
        let traversable: Vec<bool> = self.cells.iter().map(Cell::is_traversable).collect();
        for i in 0..self.cells.len() {
            let p = self.cells[i].pos();
            let neighbors: Vec<Point> = p
                .neighbors_4()
                .into_iter()
                .filter(|&n| self.index(n).is_some_and(|ni| traversable[ni]))
                .collect();
            self.cells[i].set_neighbors(neighbors);
        }
    }

    /// Replace all cells with fresh empty cells of the same dimensions.
    pub fn reset(&mut self) {
        self.cells = fresh_cells(self.rows, self.cols);
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of cells with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|c| c.role() == role).count()
    }

    /// Row-major snapshot of every role.
    pub fn roles(&self) -> Vec<Role> {
        self.cells.iter().map(Cell::role).collect()
    }

    fn out_of_range(&self, p: Point) -> GridError {
        GridError::OutOfRange {
            row: p.row(),
            col: p.col(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

fn fresh_cells(rows: i32, cols: i32) -> Vec<Cell> {
    Range::new(0, 0, cols, rows).iter().map(Cell::new).collect()
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell whose role changed since the previous frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub pos: Point,
    pub role: Role,
}

/// A set of role changes plus the geometry needed to place them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cols: i32,
    pub cell_size: i32,
}

/// Compute the cells of `grid` whose role differs from the snapshot `prev`.
///
/// A snapshot of the wrong length (e.g. empty, before the first flush)
/// yields a full frame.
pub fn compute_frame(prev: &[Role], grid: &Grid) -> Frame {
    let full = prev.len() != grid.len();
    let cells = grid
        .iter()
        .enumerate()
        .filter(|&(i, c)| full || prev[i] != c.role())
        .map(|(_, c)| FrameCell {
            pos: c.pos(),
            role: c.role(),
        })
        .collect();
    Frame {
        cells,
        rows: grid.rows(),
        cols: grid.cols(),
        cell_size: grid.cell_size(),
    }
}
