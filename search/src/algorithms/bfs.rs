//! Breadth-first search.
//!
//! FIFO frontier; a neighbour is queued only if it is neither explored nor
//! already queued, and its parent is recorded when it is queued. The goal
//! test happens when a node is dequeued, so the path found is hop-minimal.
//! Its reported cost is the edge-weight sum along that path, which need not
//! be the cheapest path.

use pathstep_kernel::node::NodeId;

use crate::contract::{Advance, Discipline, Stepwise};
use crate::frontier::{ExploredSet, FifoFrontier};
use crate::observer::Scores;
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;
use crate::tree::SearchTree;

/// Breadth-first search as a [`crate::contract::SearchAlgorithm`].
pub type BreadthFirst = Stepwise<BfsRun>;

impl BreadthFirst {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self::with_config(policy, ())
    }
}

/// State of one breadth-first run.
#[derive(Debug)]
pub struct BfsRun {
    ctx: RunContext,
    frontier: FifoFrontier,
    explored: ExploredSet,
    tree: SearchTree,
}

impl BfsRun {
    #[must_use]
    pub fn frontier(&self) -> &FifoFrontier {
        &self.frontier
    }

    #[must_use]
    pub fn explored(&self) -> &ExploredSet {
        &self.explored
    }

    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}

impl Discipline for BfsRun {
    type Config = ();

    const NAME: &'static str = "bfs";

    fn begin(_config: &(), _policy: &SearchPolicy, ctx: RunContext) -> Self {
        let start = ctx.start();
        let mut frontier = FifoFrontier::new();
        frontier.push(start);
        Self {
            ctx,
            frontier,
            explored: ExploredSet::new(),
            tree: SearchTree::rooted(start),
        }
    }

    fn advance(&mut self) -> Advance {
        let Some(current) = self.frontier.pop() else {
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
            Scores::ZERO,
            || self.frontier.snapshot(),
            || self.explored.snapshot(),
        );
        if current == self.ctx.goal() {
            return Advance::Finish(TerminationReason::GoalReached);
        }

        let graph = self.ctx.shared_graph();
        for edge in graph.edges_from(current) {
            if self.explored.contains(edge.to) || self.frontier.contains(edge.to) {
                continue;
            }
            self.frontier.push(edge.to);
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
        let path: Option<Vec<NodeId>> = match reason {
            TerminationReason::GoalReached => self.tree.path_to(self.ctx.goal()),
            _ => None,
        };
        let explored = self.explored.len();
        self.ctx.finish(reason, path, None, explored)
    }
}
