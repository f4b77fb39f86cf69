//! Greedy best-first search.
//!
//! Frontier ordered by `h(node, goal)` alone, computed once when the node is
//! queued. A neighbour is queued once: only if it is neither explored nor
//! already queued. The path found is not necessarily cheapest.

use std::sync::Arc;

use pathstep_kernel::heuristic::Heuristic;
use pathstep_kernel::node::NodeId;

use super::Estimator;
use crate::contract::{Advance, Discipline, Stepwise};
use crate::frontier::{ExploredSet, PriorityFrontier};
use crate::observer::Scores;
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;
use crate::tree::SearchTree;

/// Greedy best-first search as a [`crate::contract::SearchAlgorithm`].
pub type GreedyBestFirst = Stepwise<BestFirstRun>;

impl GreedyBestFirst {
    #[must_use]
    pub fn new(policy: SearchPolicy, heuristic: Arc<dyn Heuristic>) -> Self {
        Self::with_config(policy, heuristic)
    }
}

/// State of one greedy best-first run.
#[derive(Debug)]
pub struct BestFirstRun {
    ctx: RunContext,
    estimator: Estimator,
    frontier: PriorityFrontier,
    explored: ExploredSet,
    tree: SearchTree,
}

impl BestFirstRun {
    #[must_use]
    pub fn frontier(&self) -> &PriorityFrontier {
        &self.frontier
    }
}

impl Discipline for BestFirstRun {
    type Config = Arc<dyn Heuristic>;

    const NAME: &'static str = "best-first";

    fn begin(heuristic: &Arc<dyn Heuristic>, policy: &SearchPolicy, ctx: RunContext) -> Self {
        let estimator = Estimator::new(heuristic, policy);
        let start = ctx.start();
        let mut frontier = PriorityFrontier::new(policy.tie_break);
        frontier.push(start, estimator.estimate(ctx.graph(), start, ctx.goal()));
        Self {
            ctx,
            estimator,
            frontier,
            explored: ExploredSet::new(),
            tree: SearchTree::rooted(start),
        }
    }

    fn advance(&mut self) -> Advance {
        let Some((current, h)) = self.frontier.pop() else {
            return Advance::Finish(TerminationReason::FrontierExhausted);
        };
        self.explored.insert(current);
        let (depth, cost) = self
            .tree
            .get(current)
            .map_or((0, 0.0), |e| (e.depth, e.cost));
        self.ctx.expanded(
            current,
            depth,
            cost,
            Scores::greedy(h),
            || self.frontier.snapshot(),
            || self.explored.snapshot(),
        );
        let goal = self.ctx.goal();
        if current == goal {
            return Advance::Finish(TerminationReason::GoalReached);
        }

        let graph = self.ctx.shared_graph();
        for edge in graph.edges_from(current) {
            if self.explored.contains(edge.to) || self.frontier.contains(edge.to) {
                continue;
            }
            let h = self.estimator.estimate(&graph, edge.to, goal);
            self.frontier.push(edge.to, h);
            let cost = graph.edge_cost(current, edge.to).unwrap_or(edge.cost);
            self.tree.link(edge.to, current, cost);
            self.ctx.metrics_mut().record_generated();
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
