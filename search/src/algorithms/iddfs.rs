//! Iterative-deepening depth-first search.
//!
//! Runs depth-limited DFS passes with limits 0, 1, 2, ... Each pass starts
//! from a fresh stack, explored set and tree; `nodes_expanded` accumulates
//! across passes. When a pass empties its stack the next `step` raises the
//! limit without expanding anything.
//!
//! The run also remembers the depth each node was first expanded at. A node
//! first expanded in pass `L` sits at hop distance `L` from the start (every
//! closer node was already expanded in an earlier pass), so that depth is
//! its BFS depth. Later passes drop any frame deeper than it. Every
//! expansion therefore happens at the node's BFS depth and at most once per
//! pass: the goal is found at its BFS depth, and a run does at most
//! `(cap + 1) * node_count` expansions.

use std::collections::HashMap;

use pathstep_kernel::node::NodeId;

use crate::contract::{Advance, Discipline, Stepwise};
use crate::frontier::{DepthFrame, DepthStack, ExploredSet};
use crate::observer::Scores;
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;
use crate::tree::SearchTree;

/// Iterative deepening as a [`crate::contract::SearchAlgorithm`].
pub type IterativeDeepening = Stepwise<IddfsRun>;

impl IterativeDeepening {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self::with_config(policy, ())
    }
}

/// State of one iterative-deepening run.
#[derive(Debug)]
pub struct IddfsRun {
    ctx: RunContext,
    stack: DepthStack,
    explored: ExploredSet,
    tree: SearchTree,
    /// Depth each node was first expanded at. Kept across passes.
    shallowest: HashMap<NodeId, u32>,
    limit: u32,
    cap: u32,
    stop_on_exhausted_pass: bool,
    /// Whether the current pass expanded a node at the limit that had
    /// out-edges, i.e. whether a deeper pass could see more.
    pass_hit_limit: bool,
}

impl IddfsRun {
    /// Depth limit of the current pass.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn stack(&self) -> &DepthStack {
        &self.stack
    }

    fn start_pass(&mut self) {
        let start = self.ctx.start();
        self.stack.clear();
        self.stack.push(DepthFrame {
            node: start,
            depth: 0,
            via: None,
        });
        self.explored = ExploredSet::new();
        self.tree = SearchTree::rooted(start);
        self.pass_hit_limit = false;
        self.ctx.metrics_mut().depth_limit = Some(self.limit);
    }

    fn deepen(&mut self) -> Advance {
        if self.stop_on_exhausted_pass && !self.pass_hit_limit {
            tracing::debug!(limit = self.limit, "pass exhausted below its limit");
            return Advance::Finish(TerminationReason::FrontierExhausted);
        }
        let next = self.limit.saturating_add(1);
        if next > self.cap || next == self.limit {
            tracing::debug!(cap = self.cap, "depth cap reached");
            return Advance::Finish(TerminationReason::DepthCapReached { cap: self.cap });
        }
        self.limit = next;
        tracing::debug!(limit = self.limit, "increasing depth limit");
        self.start_pass();
        Advance::Continue
    }

    /// Whether a frame for `node` at `depth` can be skipped in this pass.
    fn is_settled(&self, node: NodeId, depth: u32) -> bool {
        self.explored.contains(node) || self.shallowest.get(&node).is_some_and(|&d| d < depth)
    }

    fn expand(&mut self, frame: DepthFrame) -> Advance {
        let current = frame.node;
        if let Some((parent, edge_cost)) = frame.via {
            self.tree.link(current, parent, edge_cost);
        }
        self.explored.insert(current);
        self.shallowest.entry(current).or_insert(frame.depth);
        let cost = self.tree.cost(current).unwrap_or(0.0);
        self.ctx.expanded(
            current,
            frame.depth,
            cost,
            Scores::ZERO,
            || self.stack.snapshot(),
            || self.explored.snapshot(),
        );
        if current == self.ctx.goal() {
            return Advance::Finish(TerminationReason::GoalReached);
        }

        let graph = self.ctx.shared_graph();
        let edges = graph.edges_from(current);
        if frame.depth < self.limit {
            let depth = frame.depth + 1;
            for edge in edges.iter().rev() {
                if self.is_settled(edge.to, depth) {
                    continue;
                }
                let cost = graph.edge_cost(current, edge.to).unwrap_or(edge.cost);
                self.stack.push(DepthFrame {
                    node: edge.to,
                    depth,
                    via: Some((current, cost)),
                });
                self.ctx.metrics_mut().record_generated();
            }
        } else if !edges.is_empty() {
            self.pass_hit_limit = true;
        }
        self.ctx
            .metrics_mut()
            .observe(self.stack.len(), self.explored.len());
        Advance::Continue
    }
}

impl Discipline for IddfsRun {
    type Config = ();

    const NAME: &'static str = "iddfs";

    fn begin(_config: &(), policy: &SearchPolicy, ctx: RunContext) -> Self {
        let start = ctx.start();
        let mut run = Self {
            ctx,
            stack: DepthStack::new(),
            explored: ExploredSet::new(),
            tree: SearchTree::rooted(start),
            shallowest: HashMap::new(),
            limit: 0,
            cap: policy.max_depth_cap,
            stop_on_exhausted_pass: policy.stop_on_exhausted_pass,
            pass_hit_limit: false,
        };
        run.start_pass();
        run
    }

    fn advance(&mut self) -> Advance {
        while let Some(frame) = self.stack.pop() {
            if self.is_settled(frame.node, frame.depth) {
                continue;
            }
            return self.expand(frame);
        }
        self.deepen()
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
