use std::collections::BinaryHeap;

/// Sentinel value meaning "not reached" in distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Frontier entry, ordered by `(dist, order)` for use in `BinaryHeap`.
///
/// `order` is the insertion counter; it makes entries totally ordered so
/// equal distances pop first-in first-out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) dist: i32,
    pub(crate) order: u64,
    pub(crate) idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-run bookkeeping, indexed by flat grid index. Dropped with the run.
pub(crate) struct SearchState {
    pub(crate) frontier: BinaryHeap<Entry>,
    pub(crate) dist: Vec<i32>,
    pub(crate) parent: Vec<Option<usize>>,
    /// Cells with a live entry in `frontier`.
    pub(crate) present: Vec<bool>,
    pub(crate) settled: Vec<bool>,
    counter: u64,
}

impl SearchState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            frontier: BinaryHeap::new(),
            dist: vec![UNREACHABLE; len],
            parent: vec![None; len],
            present: vec![false; len],
            settled: vec![false; len],
            counter: 0,
        }
    }

    /// Seed the source at distance 0 with insertion order 0.
    pub(crate) fn seed(&mut self, idx: usize) {
        self.dist[idx] = 0;
        self.frontier.push(Entry {
            dist: 0,
            order: 0,
            idx,
        });
        self.present[idx] = true;
    }

    /// Push `idx` with a fresh insertion order.
    pub(crate) fn push(&mut self, idx: usize, dist: i32) {
        self.counter += 1;
        self.frontier.push(Entry {
            dist,
            order: self.counter,
            idx,
        });
        self.present[idx] = true;
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        let e = self.frontier.pop()?;
        self.present[e.idx] = false;
        Some(e)
    }
}
