//! The five search disciplines and a name-based selector over them.

pub mod astar;
pub mod best_first;
pub mod bfs;
pub mod dfs;
pub mod iddfs;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use pathstep_kernel::graph::Graph;
use pathstep_kernel::heuristic::{Heuristic, HeuristicKind};
use pathstep_kernel::node::NodeId;

use crate::contract::SearchAlgorithm;
use crate::error::SearchError;
use crate::policy::{HeuristicCheck, SearchPolicy};

pub use astar::AStar;
pub use best_first::GreedyBestFirst;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use iddfs::IterativeDeepening;

/// Selector for a search discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    BreadthFirst,
    DepthFirst,
    IterativeDeepening,
    GreedyBestFirst,
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [Self; 5] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::IterativeDeepening,
        Self::GreedyBestFirst,
        Self::AStar,
    ];

    /// Name used in results and accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::IterativeDeepening => "iddfs",
            Self::GreedyBestFirst => "best-first",
            Self::AStar => "astar",
        }
    }

    /// Whether the discipline consults a heuristic.
    #[must_use]
    pub fn is_informed(self) -> bool {
        matches!(self, Self::GreedyBestFirst | Self::AStar)
    }

    /// Build the discipline with a built-in heuristic. Uninformed
    /// disciplines ignore `heuristic`.
    #[must_use]
    pub fn build(self, policy: SearchPolicy, heuristic: HeuristicKind) -> Box<dyn SearchAlgorithm> {
        self.build_with(policy, heuristic.build())
    }

    /// Build the discipline with a caller-supplied heuristic.
    #[must_use]
    pub fn build_with(
        self,
        policy: SearchPolicy,
        heuristic: Arc<dyn Heuristic>,
    ) -> Box<dyn SearchAlgorithm> {
        match self {
            Self::BreadthFirst => Box::new(BreadthFirst::new(policy)),
            Self::DepthFirst => Box::new(DepthFirst::new(policy)),
            Self::IterativeDeepening => Box::new(IterativeDeepening::new(policy)),
            Self::GreedyBestFirst => Box::new(GreedyBestFirst::new(policy, heuristic)),
            Self::AStar => Box::new(AStar::new(policy, heuristic)),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            "iddfs" | "iterative-deepening" => Ok(Self::IterativeDeepening),
            "best-first" | "greedy" | "greedy-best-first" => Ok(Self::GreedyBestFirst),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Heuristic plus the policy's treatment of its estimates.
#[derive(Clone)]
pub(crate) struct Estimator {
    heuristic: Arc<dyn Heuristic>,
    check: HeuristicCheck,
}

impl Estimator {
    pub(crate) fn new(heuristic: &Arc<dyn Heuristic>, policy: &SearchPolicy) -> Self {
        Self {
            heuristic: Arc::clone(heuristic),
            check: policy.heuristic_check,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.heuristic.name()
    }

    /// `h(node, goal)`; zero if either id is not in `graph`.
    pub(crate) fn estimate(&self, graph: &Graph, node: NodeId, goal: NodeId) -> f64 {
        match (graph.node(node), graph.node(goal)) {
            (Some(n), Some(g)) => self.check.apply(self.heuristic.estimate(n, g)),
            _ => 0.0,
        }
    }
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Estimator")
            .field("heuristic", &self.heuristic.name())
            .field("check", &self.check)
            .finish()
    }
}
