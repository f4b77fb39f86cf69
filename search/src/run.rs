//! Bookkeeping shared by every discipline during one run.
//!
//! A [`RunContext`] owns the graph handle, the observer, the counters and
//! the expansion digest. Disciplines own their frontier and tree and report
//! to the context on each expansion and once at the end.

use std::sync::Arc;
use std::time::Instant;

use pathstep_kernel::graph::Graph;
use pathstep_kernel::hash::{CanonicalHasher, DOMAIN_EXPANSION_TRACE};
use pathstep_kernel::node::NodeId;

use crate::error::SearchError;
use crate::metrics::Metrics;
use crate::observer::{Scores, SearchObserver, StepEvent};
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};

/// Costs within this distance are treated as equal when the tracked cost is
/// checked against the recomputed path cost.
const COST_TOLERANCE: f64 = 1e-9;

/// Per-run state that is the same for every discipline.
pub struct RunContext {
    algorithm: &'static str,
    graph: Arc<Graph>,
    start: NodeId,
    goal: NodeId,
    observer: Box<dyn SearchObserver>,
    metrics: Metrics,
    started_at: Instant,
    trace: CanonicalHasher,
    capture_snapshots: bool,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("algorithm", &self.algorithm)
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl RunContext {
    /// Validate the endpoints and start the clock.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] if `start` or `goal` is not a
    /// node of `graph`.
    pub fn new(
        algorithm: &'static str,
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        observer: Box<dyn SearchObserver>,
        policy: &SearchPolicy,
    ) -> Result<Self, SearchError> {
        graph
            .check(start)
            .map_err(|source| SearchError::InvalidEndpoint {
                role: "start",
                source,
            })?;
        graph
            .check(goal)
            .map_err(|source| SearchError::InvalidEndpoint {
                role: "goal",
                source,
            })?;
        tracing::debug!(algorithm, %start, %goal, nodes = graph.len(), "search initialized");
        Ok(Self {
            algorithm,
            graph,
            start,
            goal,
            observer,
            metrics: Metrics::started(),
            started_at: Instant::now(),
            trace: CanonicalHasher::new(DOMAIN_EXPANSION_TRACE),
            capture_snapshots: policy.capture_snapshots,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Owned handle to the graph, for disciplines that iterate edges while
    /// mutating the context.
    #[must_use]
    pub fn shared_graph(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    /// Record one expansion and notify the observer.
    ///
    /// Snapshot closures run only when snapshot capture is enabled.
    pub fn expanded(
        &mut self,
        node: NodeId,
        depth: u32,
        path_cost: f64,
        scores: Scores,
        frontier: impl FnOnce() -> Vec<NodeId>,
        explored: impl FnOnce() -> Vec<NodeId>,
    ) {
        self.metrics.record_expansion();
        self.trace.update(&node.to_le_bytes());
        tracing::trace!(
            algorithm = self.algorithm,
            %node,
            depth,
            g = scores.g,
            h = scores.h,
            f = scores.f,
            expanded = self.metrics.nodes_expanded,
            "expand"
        );
        let (frontier, explored) = if self.capture_snapshots {
            (frontier(), explored())
        } else {
            (Vec::new(), Vec::new())
        };
        let event = StepEvent {
            node,
            frontier,
            explored,
            metrics: self.metrics,
            path_cost,
            depth,
            scores,
        };
        self.observer.on_step(&self.graph, &event);
    }

    /// Build the result, deliver the finish notification and consume the
    /// context.
    ///
    /// `path` is the reconstructed start→goal path, or `None` when the run
    /// failed. `tracked_cost` is the discipline's own cost-from-start for the
    /// goal, checked against the graph's edge costs.
    pub fn finish(
        mut self,
        termination: TerminationReason,
        path: Option<Vec<NodeId>>,
        tracked_cost: Option<f64>,
        explored_size: usize,
    ) -> SearchResult {
        let path_ids = path.unwrap_or_default();
        let total_cost = if path_ids.is_empty() {
            f64::INFINITY
        } else {
            self.graph.path_cost(&path_ids).unwrap_or(f64::INFINITY)
        };
        if let Some(tracked) = tracked_cost {
            if (tracked - total_cost).abs() > COST_TOLERANCE {
                tracing::warn!(
                    algorithm = self.algorithm,
                    tracked,
                    total_cost,
                    "tracked cost disagrees with path cost"
                );
            }
        }
        let path = path_ids
            .iter()
            .filter_map(|&id| self.graph.node(id).cloned())
            .collect();
        let solution_depth = path_ids
            .len()
            .checked_sub(1)
            .and_then(|d| u32::try_from(d).ok());
        let result = SearchResult {
            algorithm: self.algorithm,
            termination,
            path,
            path_ids,
            total_cost,
            tracked_cost,
            nodes_expanded: self.metrics.nodes_expanded,
            nodes_generated: self.metrics.nodes_generated,
            explored_size: explored_size as u64,
            max_frontier_size: self.metrics.max_frontier_size,
            solution_depth,
            elapsed: self.started_at.elapsed(),
            memory_bytes: self.metrics.approx_memory_bytes(),
            expansion_digest: self.trace.snapshot(),
        };
        tracing::debug!(
            algorithm = self.algorithm,
            termination = termination.as_str(),
            expanded = result.nodes_expanded,
            cost = result.total_cost,
            "search finished"
        );
        self.observer.on_finish(&self.graph, &result);
        result
    }
}
