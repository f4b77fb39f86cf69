//! Per-run counters.
//!
//! A `Metrics` value is owned by the run and updated only through its
//! methods; observers receive copies.

use std::mem::size_of;

use pathstep_kernel::node::NodeId;

/// Cumulative counters for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Frontier entries popped and processed. Accumulates across
    /// iterative-deepening passes.
    pub nodes_expanded: u64,
    /// Frontier insertions, including the start node.
    pub nodes_generated: u64,
    /// Largest frontier size observed.
    pub max_frontier_size: u64,
    /// Largest `frontier + explored` size observed.
    pub peak_footprint: u64,
    /// Current depth limit (iterative deepening only).
    pub depth_limit: Option<u32>,
}

/// Approximate bytes held per tracked node: its id in a frontier or explored
/// container plus a search-tree entry (parent, depth, cost).
pub const BYTES_PER_TRACKED_NODE: u64 =
    (size_of::<NodeId>() * 2 + size_of::<Option<NodeId>>() + size_of::<u32>() + size_of::<f64>())
        as u64;

impl Metrics {
    /// Counters for a run whose start node has just been queued.
    #[must_use]
    pub fn started() -> Self {
        Self {
            nodes_generated: 1,
            max_frontier_size: 1,
            peak_footprint: 1,
            ..Self::default()
        }
    }

    pub fn record_expansion(&mut self) {
        self.nodes_expanded += 1;
    }

    pub fn record_generated(&mut self) {
        self.nodes_generated += 1;
    }

    /// Fold the current container sizes into the high-water marks.
    pub fn observe(&mut self, frontier_len: usize, explored_len: usize) {
        let frontier = frontier_len as u64;
        let footprint = (frontier_len + explored_len) as u64;
        self.max_frontier_size = self.max_frontier_size.max(frontier);
        self.peak_footprint = self.peak_footprint.max(footprint);
    }

    /// Approximate memory held by the run's bookkeeping at its peak.
    #[must_use]
    pub fn approx_memory_bytes(&self) -> u64 {
        self.peak_footprint * BYTES_PER_TRACKED_NODE
    }
}
