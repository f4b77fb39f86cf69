//! Depth-first search.
//!
//! Neighbours are pushed in reverse edge order so they are popped in graph
//! order. A neighbour is pushed only if it is neither explored nor already
//! on the stack; the first node to push it becomes its parent.

use pathstep_kernel::node::NodeId;

use crate::contract::{Advance, Discipline, Stepwise};
use crate::frontier::{ExploredSet, StackFrontier};
use crate::observer::Scores;
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;
use crate::tree::SearchTree;

/// Depth-first search as a [`crate::contract::SearchAlgorithm`].
pub type DepthFirst = Stepwise<DfsRun>;

impl DepthFirst {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self::with_config(policy, ())
    }
}

/// State of one depth-first run.
#[derive(Debug)]
pub struct DfsRun {
    ctx: RunContext,
    stack: StackFrontier,
    explored: ExploredSet,
    tree: SearchTree,
}

impl DfsRun {
    #[must_use]
    pub fn stack(&self) -> &StackFrontier {
        &self.stack
    }

    #[must_use]
    pub fn explored(&self) -> &ExploredSet {
        &self.explored
    }
}

impl Discipline for DfsRun {
    type Config = ();

    const NAME: &'static str = "dfs";

    fn begin(_config: &(), _policy: &SearchPolicy, ctx: RunContext) -> Self {
        let start = ctx.start();
        let mut stack = StackFrontier::new();
        stack.push(start);
        Self {
            ctx,
            stack,
            explored: ExploredSet::new(),
            tree: SearchTree::rooted(start),
        }
    }

    fn advance(&mut self) -> Advance {
        let Some(current) = self.stack.pop() else {
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
            || self.stack.snapshot(),
            || self.explored.snapshot(),
        );
        if current == self.ctx.goal() {
            return Advance::Finish(TerminationReason::GoalReached);
        }

        let graph = self.ctx.shared_graph();
        for edge in graph.edges_from(current).iter().rev() {
            if self.explored.contains(edge.to) || self.stack.contains(edge.to) {
                continue;
            }
            self.stack.push(edge.to);
            let cost = graph.edge_cost(current, edge.to).unwrap_or(edge.cost);
            self.tree.link(edge.to, current, cost);
            self.ctx.metrics_mut().record_generated();
        }
        self.ctx
            .metrics_mut()
            .observe(self.stack.len(), self.explored.len());

        if self.stack.is_empty() {
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
