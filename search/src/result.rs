//! The immutable record produced when a run finishes.

use std::time::Duration;

use pathstep_kernel::hash::ContentHash;
use pathstep_kernel::node::{Node, NodeId};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The goal was popped from the frontier.
    GoalReached,
    /// The frontier emptied without reaching the goal.
    FrontierExhausted,
    /// Iterative deepening passed its depth cap without reaching the goal.
    DepthCapReached { cap: u32 },
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::DepthCapReached { .. } => "depth_cap_reached",
        }
    }
}

/// Outcome of one search run.
///
/// Delivered to [`crate::observer::SearchObserver::on_finish`] and returned by
/// [`crate::contract::SearchAlgorithm::solve`].
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Name of the discipline that produced this result.
    pub algorithm: &'static str,
    pub termination: TerminationReason,
    /// Start→goal path; empty when no path was found.
    pub path: Vec<Node>,
    /// Same path as node ids.
    pub path_ids: Vec<NodeId>,
    /// Sum of graph edge costs along `path`; `+inf` when no path was found.
    pub total_cost: f64,
    /// Cost-from-start the search itself tracked for the goal. Agrees with
    /// `total_cost` for a consistent run.
    pub tracked_cost: Option<f64>,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    /// Size of the explored set when the run finished.
    pub explored_size: u64,
    pub max_frontier_size: u64,
    /// Edges on the path; `None` when no path was found.
    pub solution_depth: Option<u32>,
    /// Wall time from `initialize` to finish.
    pub elapsed: Duration,
    /// Approximate peak bookkeeping memory.
    pub memory_bytes: u64,
    /// Digest over the ordered sequence of expanded nodes.
    pub expansion_digest: ContentHash,
}

impl SearchResult {
    /// Returns `true` if the run terminated because the goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination == TerminationReason::GoalReached
    }

    /// Solution depth with the `-1` sentinel for "no path".
    #[must_use]
    pub fn solution_depth_or_sentinel(&self) -> i64 {
        self.solution_depth.map_or(-1, i64::from)
    }

    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Node names along the path.
    #[must_use]
    pub fn path_names(&self) -> Vec<&str> {
        self.path.iter().map(Node::name).collect()
    }

    /// Compare everything except wall time.
    ///
    /// Two runs of the same discipline on the same input agree on this
    /// whether they were stepped by hand or solved in one call.
    #[must_use]
    pub fn same_outcome(&self, other: &Self) -> bool {
        let cost_eq = |a: f64, b: f64| (a.is_infinite() && b.is_infinite()) || (a - b).abs() < 1e-9;
        let tracked_eq = match (self.tracked_cost, other.tracked_cost) {
            (Some(a), Some(b)) => cost_eq(a, b),
            (a, b) => a.is_none() && b.is_none(),
        };
        self.algorithm == other.algorithm
            && self.termination == other.termination
            && self.path_ids == other.path_ids
            && cost_eq(self.total_cost, other.total_cost)
            && tracked_eq
            && self.nodes_expanded == other.nodes_expanded
            && self.nodes_generated == other.nodes_generated
            && self.explored_size == other.explored_size
            && self.max_frontier_size == other.max_frontier_size
            && self.solution_depth == other.solution_depth
            && self.memory_bytes == other.memory_bytes
            && self.expansion_digest == other.expansion_digest
    }

    /// JSON form. Infinite costs render as `null`; a missing depth renders
    /// as `-1`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let finite = |c: f64| if c.is_finite() { Some(c) } else { None };
        serde_json::json!({
            "algorithm": self.algorithm,
            "elapsed_millis": self.elapsed_millis(),
            "expansion_digest": self.expansion_digest.as_str(),
            "explored_size": self.explored_size,
            "max_frontier_size": self.max_frontier_size,
            "memory_bytes": self.memory_bytes,
            "nodes_expanded": self.nodes_expanded,
            "nodes_generated": self.nodes_generated,
            "path": self.path_names(),
            "solution_depth": self.solution_depth_or_sentinel(),
            "termination": self.termination.as_str(),
            "total_cost": finite(self.total_cost),
            "tracked_cost": self.tracked_cost.and_then(finite),
        })
    }
}
