//! Harness runner: drives search algorithms step by step.
//!
//! The runner owns no search logic. It calls `step` on a
//! [`SearchAlgorithm`] until the run finishes, a [`CancelToken`] fires, or a
//! step budget runs out. A driver that stops on its budget can be handed the
//! same algorithm again to resume where it left off.
//!
//! # Pipeline
//!
//! ```text
//! Problem::by_name() → AlgorithmKind::build() → initialize()
//!   → Driver::drive() → [step() × N] → DriveOutcome
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pathstep_kernel::graph::Graph;
use pathstep_kernel::heuristic::HeuristicKind;
use pathstep_kernel::node::NodeId;
use pathstep_search::algorithms::AlgorithmKind;
use pathstep_search::contract::SearchAlgorithm;
use pathstep_search::error::SearchError;
use pathstep_search::observer::{NoopObserver, SearchObserver};
use pathstep_search::policy::SearchPolicy;
use pathstep_search::result::SearchResult;

/// A start/goal query against a shared graph.
#[derive(Debug, Clone)]
pub struct Problem {
    pub graph: Arc<Graph>,
    pub start: NodeId,
    pub goal: NodeId,
}

impl Problem {
    #[must_use]
    pub fn new(graph: Arc<Graph>, start: NodeId, goal: NodeId) -> Self {
        Self { graph, start, goal }
    }

    /// Resolve `start` and `goal` by node name.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] if either name is not in the
    /// graph.
    pub fn by_name(graph: Arc<Graph>, start: &str, goal: &str) -> Result<Self, SearchError> {
        let start = graph
            .require(start)
            .map_err(|source| SearchError::InvalidEndpoint {
                role: "start",
                source,
            })?;
        let goal = graph
            .require(goal)
            .map_err(|source| SearchError::InvalidEndpoint {
                role: "goal",
                source,
            })?;
        Ok(Self { graph, start, goal })
    }

    /// The same query with start and goal swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            start: self.goal,
            goal: self.start,
        }
    }

    /// Initialize `algorithm` on this problem.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchAlgorithm::initialize`] failures.
    pub fn initialize(
        &self,
        algorithm: &mut dyn SearchAlgorithm,
        observer: Box<dyn SearchObserver>,
    ) -> Result<(), SearchError> {
        algorithm.initialize(Arc::clone(&self.graph), self.start, self.goal, observer)
    }

    /// Solve this problem with `algorithm`.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchAlgorithm::solve`] failures.
    pub fn solve(
        &self,
        algorithm: &mut dyn SearchAlgorithm,
        observer: Box<dyn SearchObserver>,
    ) -> Result<SearchResult, SearchError> {
        algorithm.solve(Arc::clone(&self.graph), self.start, self.goal, observer)
    }
}

/// Cooperative stop signal shared between a driver and its controller.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Why [`Driver::drive`] returned.
#[derive(Debug, Clone)]
pub enum DriveOutcome {
    /// The run reached a terminal state.
    Finished(SearchResult),
    /// The cancel token fired. `steps` counts steps taken in this call.
    Cancelled { steps: u64 },
    /// The step budget ran out before the run finished.
    BudgetExhausted { steps: u64 },
    /// The algorithm was never initialized.
    NotInitialized,
}

impl DriveOutcome {
    #[must_use]
    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            Self::Finished(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_result(self) -> Option<SearchResult> {
        match self {
            Self::Finished(result) => Some(result),
            _ => None,
        }
    }
}

/// Steps an initialized algorithm under a budget and a cancel token.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    cancel: Option<CancelToken>,
    step_budget: Option<u64>,
}

impl Driver {
    /// A driver with no budget and no cancel token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stop after at most `budget` steps per [`Driver::drive`] call.
    #[must_use]
    pub fn with_step_budget(mut self, budget: u64) -> Self {
        self.step_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Step `algorithm` until it finishes, the token fires, or the budget
    /// runs out. The token is checked once before every step.
    pub fn drive(&self, algorithm: &mut dyn SearchAlgorithm) -> DriveOutcome {
        let mut steps = 0u64;
        loop {
            if let Some(result) = algorithm.result() {
                return DriveOutcome::Finished(result.clone());
            }
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                tracing::debug!(algorithm = algorithm.name(), steps, "drive cancelled");
                return DriveOutcome::Cancelled { steps };
            }
            if self.step_budget.is_some_and(|budget| steps >= budget) {
                return DriveOutcome::BudgetExhausted { steps };
            }
            let more = algorithm.step();
            steps += 1;
            if !more && !algorithm.is_finished() {
                return DriveOutcome::NotInitialized;
            }
        }
    }
}

/// Solve one problem with every discipline, in [`AlgorithmKind::ALL`] order.
///
/// # Errors
///
/// Returns the first pre-flight failure; no results are returned in that
/// case.
pub fn run_all(
    problem: &Problem,
    policy: &SearchPolicy,
    heuristic: HeuristicKind,
) -> Result<Vec<SearchResult>, SearchError> {
    AlgorithmKind::ALL
        .iter()
        .map(|&kind| run_one(problem, kind, policy, heuristic))
        .collect()
}

/// Solve one problem with one discipline.
///
/// # Errors
///
/// Propagates pre-flight failures from `solve`.
pub fn run_one(
    problem: &Problem,
    kind: AlgorithmKind,
    policy: &SearchPolicy,
    heuristic: HeuristicKind,
) -> Result<SearchResult, SearchError> {
    let mut algorithm = kind.build(policy.clone(), heuristic);
    let result = problem.solve(algorithm.as_mut(), Box::new(NoopObserver))?;
    tracing::info!(
        algorithm = result.algorithm,
        heuristic = heuristic.as_str(),
        termination = result.termination.as_str(),
        expanded = result.nodes_expanded,
        cost = result.total_cost,
        "run complete"
    );
    Ok(result)
}

/// JSON summary of a batch of results, keyed by algorithm name.
#[must_use]
pub fn summary_json(results: &[SearchResult]) -> serde_json::Value {
    let runs: serde_json::Map<String, serde_json::Value> = results
        .iter()
        .map(|r| (r.algorithm.to_string(), r.to_json_value()))
        .collect();
    serde_json::json!({
        "run_count": results.len(),
        "runs": runs,
        "schema_version": "pathstep_summary.v1",
    })
}
