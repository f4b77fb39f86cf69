//! Observer protocol: how a driver watches a run.
//!
//! Observers get one [`SearchObserver::on_step`] per expansion and one
//! [`SearchObserver::on_finish`] per run. Both receive the graph so node ids
//! can be resolved to names without the observer holding its own handle.

use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::NodeId;

use crate::metrics::Metrics;
use crate::result::SearchResult;

/// Cost bookkeeping reported with each expansion.
///
/// Uninformed disciplines report all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scores {
    /// Cost from start.
    pub g: f64,
    /// Heuristic estimate to goal.
    pub h: f64,
    /// Priority used by the frontier.
    pub f: f64,
}

impl Scores {
    pub const ZERO: Self = Self {
        g: 0.0,
        h: 0.0,
        f: 0.0,
    };

    /// A* scores: `f = g + h`.
    #[must_use]
    pub fn astar(g: f64, h: f64) -> Self {
        Self { g, h, f: g + h }
    }

    /// Greedy best-first scores: `g` unused, `f = h`.
    #[must_use]
    pub fn greedy(h: f64) -> Self {
        Self { g: 0.0, h, f: h }
    }
}

/// Everything reported about a single expansion.
///
/// Snapshots are owned so an observer can forward the event to another
/// thread. They are empty when the policy disables snapshot capture.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    /// The node just expanded.
    pub node: NodeId,
    /// Frontier contents after the pop, in the order they would be expanded.
    pub frontier: Vec<NodeId>,
    /// Explored nodes in expansion order.
    pub explored: Vec<NodeId>,
    /// Counters including this expansion.
    pub metrics: Metrics,
    /// Edge-weight cost of the tree path from start to `node`.
    pub path_cost: f64,
    /// Hop count of the tree path from start to `node`.
    pub depth: u32,
    pub scores: Scores,
}

/// Receives progress notifications from a search run.
pub trait SearchObserver: Send {
    /// Called once per expansion, after the node was marked explored and
    /// before its neighbours are generated.
    fn on_step(&mut self, graph: &Graph, event: &StepEvent);

    /// Called exactly once when the run reaches a terminal state.
    fn on_finish(&mut self, _graph: &Graph, _result: &SearchResult) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&Graph, &StepEvent) + Send,
{
    fn on_step(&mut self, graph: &Graph, event: &StepEvent) {
        self(graph, event);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_step(&mut self, _graph: &Graph, _event: &StepEvent) {}
}
