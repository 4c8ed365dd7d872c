//! Grid geometry supplied once at startup.

use std::time::Duration;

use crate::error::GridError;

/// Fixed grid geometry and run pacing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub cols: i32,
    /// Side of one cell in device units (pixels, terminal columns).
    pub cell_size: i32,
    /// Pause after every search step, in milliseconds.
    pub step_delay_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 100,
            cell_size: 12,
            step_delay_ms: 0,
        }
    }
}

impl GridConfig {
    /// Reject non-positive dimensions.
    pub fn validate(&self) -> Result<(), GridError> {
        for (field, value) in [
            ("rows", self.rows),
            ("cols", self.cols),
            ("cell_size", self.cell_size),
        ] {
            if value <= 0 {
                return Err(GridError::InvalidConfig {
                    field,
                    value: value as i64,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"rows": 20, "cols": 30}"#).unwrap();
        assert_eq!(cfg.rows, 20);
        assert_eq!(cfg.cols, 30);
        assert_eq!(cfg.cell_size, 12);
        assert_eq!(cfg.step_delay_ms, 0);
    }
}
