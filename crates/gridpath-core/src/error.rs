//! Errors raised by grid lookups and configuration checks.

use std::fmt;

/// Errors produced by [`Grid`](crate::Grid) and [`GridConfig`](crate::GridConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A `(row, col)` outside `[0, rows) × [0, cols)`.
    OutOfRange {
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },
    /// A configuration field that must be positive was not.
    InvalidConfig { field: &'static str, value: i64 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows}x{cols} grid"
            ),
            Self::InvalidConfig { field, value } => {
                write!(f, "config: {field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for GridError {}
