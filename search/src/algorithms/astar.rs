//! A* search.
//!
//! Frontier ordered by `f = g + h`. `g` is the cost-from-start held in the
//! search tree. Every edge out of the expanded node is relaxed; a neighbour
//! whose `g` improves is relinked to the expanded node and queued according
//! to the [`RequeuePolicy`]. Explored nodes are reopened when their `g`
//! improves, so an admissible but inconsistent heuristic still yields the
//! cheapest path under [`RequeuePolicy::Lazy`].

use std::sync::Arc;

use pathstep_kernel::heuristic::Heuristic;
use pathstep_kernel::node::NodeId;

use super::Estimator;
use crate::contract::{Advance, Discipline, Stepwise};
use crate::frontier::{ExploredSet, PriorityFrontier};
use crate::observer::Scores;
use crate::policy::{RequeuePolicy, SearchPolicy};
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;
use crate::tree::SearchTree;

/// A* as a [`crate::contract::SearchAlgorithm`].
pub type AStar = Stepwise<AStarRun>;

impl AStar {
    #[must_use]
    pub fn new(policy: SearchPolicy, heuristic: Arc<dyn Heuristic>) -> Self {
        Self::with_config(policy, heuristic)
    }
}

/// State of one A* run.
#[derive(Debug)]
pub struct AStarRun {
    ctx: RunContext,
    estimator: Estimator,
    requeue: RequeuePolicy,
    frontier: PriorityFrontier,
    explored: ExploredSet,
    tree: SearchTree,
}

impl AStarRun {
    #[must_use]
    pub fn frontier(&self) -> &PriorityFrontier {
        &self.frontier
    }

    /// Best known cost-from-start of `node`.
    #[must_use]
    pub fn g(&self, node: NodeId) -> Option<f64> {
        self.tree.cost(node)
    }
}

impl Discipline for AStarRun {
    type Config = Arc<dyn Heuristic>;

    const NAME: &'static str = "astar";

    fn begin(heuristic: &Arc<dyn Heuristic>, policy: &SearchPolicy, ctx: RunContext) -> Self {
        let estimator = Estimator::new(heuristic, policy);
        tracing::debug!(heuristic = estimator.name(), requeue = ?policy.requeue, "a* configured");
        let start = ctx.start();
        let mut frontier = PriorityFrontier::new(policy.tie_break);
        frontier.push(start, estimator.estimate(ctx.graph(), start, ctx.goal()));
        Self {
            ctx,
            estimator,
            requeue: policy.requeue,
            frontier,
            explored: ExploredSet::new(),
            tree: SearchTree::rooted(start),
        }
    }

    fn advance(&mut self) -> Advance {
        let Some((current, _)) = self.frontier.pop() else {
            return Advance::Finish(TerminationReason::FrontierExhausted);
        };
        self.explored.insert(current);
        let graph = self.ctx.shared_graph();
        let goal = self.ctx.goal();
        let (depth, g) = self
            .tree
            .get(current)
            .map_or((0, 0.0), |e| (e.depth, e.cost));
        let h = self.estimator.estimate(&graph, current, goal);
        self.ctx.expanded(
            current,
            depth,
            g,
            Scores::astar(g, h),
            || self.frontier.snapshot(),
            || self.explored.snapshot(),
        );
        if current == goal {
            return Advance::Finish(TerminationReason::GoalReached);
        }

        for edge in graph.edges_from(current) {
            let tentative = g + edge.cost;
            if self.tree.cost(edge.to).is_some_and(|known| tentative >= known) {
                continue;
            }
            self.tree.link(edge.to, current, edge.cost);
            let f = tentative + self.estimator.estimate(&graph, edge.to, goal);
            let queued = match self.requeue {
                RequeuePolicy::Lazy => self.frontier.push(edge.to, f),
                RequeuePolicy::Never if self.frontier.contains(edge.to) => false,
                RequeuePolicy::Never => self.frontier.push(edge.to, f),
            };
            if queued {
                self.ctx.metrics_mut().record_generated();
            }
        }
        self.ctx
            .metrics_mut()
            .observe(self.frontier.len(), self.explored.len());

        if self.frontier.is_empty() {
            Advance::Finish(TerminationReason::FrontierExhausted)
        } else {
            Advance::Continue
        }
    }

    fn context(&self) -> &RunContext {
        &self.ctx
    }

    fn conclude(self, reason: TerminationReason) -> SearchResult {
        let goal = self.ctx.goal();
        let path: Option<Vec<NodeId>> = match reason {
            TerminationReason::GoalReached => self.tree.path_to(goal),
            _ => None,
        };
        let tracked = path.as_ref().and_then(|_| self.tree.cost(goal));
        let explored = self.explored.len();
        self.ctx.finish(reason, path, tracked, explored)
    }
}
