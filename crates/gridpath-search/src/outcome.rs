use gridpath_core::Point;

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end was reached. The path runs from start to end inclusive.
    Found(Vec<Point>),
    /// The frontier emptied without reaching the end.
    Exhausted,
    /// The step callback asked to stop.
    Aborted,
}

/// Counters collected during one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped and expanded (including the end, if reached).
    pub settled: usize,
    /// Frontier pushes, the seed included.
    pub pushed: usize,
    /// Calls made to the step callback.
    pub steps: usize,
}

/// Result of [`run`](crate::run).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl Report {
    /// Whether the end was reached.
    #[inline]
    pub fn found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    #[inline]
    pub fn aborted(&self) -> bool {
        self.outcome == Outcome::Aborted
    }

    /// Number of moves on the found path.
    pub fn path_len(&self) -> Option<usize> {
        match &self.outcome {
            Outcome::Found(path) => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }
}
