//! The stepwise search contract.
//!
//! [`SearchAlgorithm`] is the object-safe surface drivers use. [`Stepwise`]
//! implements it once for every [`Discipline`]: the discipline supplies the
//! frontier behaviour, `Stepwise` supplies the lifecycle.
//!
//! # Contract
//!
//! - `initialize` may be called at any time and discards any previous run.
//! - `step` expands at most one frontier entry. It returns `false` once the
//!   run is finished, and is a no-op returning `false` before `initialize`.
//! - Each run delivers exactly one `on_finish` notification.
//! - A run driven by `step` and a run driven by `solve` on the same input
//!   produce the same result and the same expansion digest.

use std::sync::Arc;

use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::NodeId;

use crate::error::SearchError;
use crate::metrics::Metrics;
use crate::observer::SearchObserver;
use crate::policy::SearchPolicy;
use crate::result::{SearchResult, TerminationReason};
use crate::run::RunContext;

/// Lifecycle position of a search algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// Initialized, no step taken yet.
    Initialized,
    Stepping,
    Finished,
}

/// A resumable search that can be driven one expansion at a time.
pub trait SearchAlgorithm: Send {
    /// Stable identifier used in results and logs.
    fn name(&self) -> &'static str;

    /// Reset all run state and queue `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] if `start` or `goal` is not a
    /// node of `graph`. The instance is left uninitialized.
    fn initialize(
        &mut self,
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        observer: Box<dyn SearchObserver>,
    ) -> Result<(), SearchError>;

    /// Perform one unit of work. Returns whether more steps remain.
    fn step(&mut self) -> bool;

    fn phase(&self) -> Phase;

    fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Counters of the current or last run.
    fn metrics(&self) -> Metrics;

    /// The finished run's result, if the run has finished.
    fn result(&self) -> Option<&SearchResult>;

    /// Initialize and step until finished.
    ///
    /// # Errors
    ///
    /// Same as [`SearchAlgorithm::initialize`].
    fn solve(
        &mut self,
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        observer: Box<dyn SearchObserver>,
    ) -> Result<SearchResult, SearchError>;
}

/// Outcome of one unit of discipline work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Continue,
    Finish(TerminationReason),
}

/// Frontier behaviour of one search discipline.
///
/// A value of an implementing type is the state of one run: it is created
/// by [`Discipline::begin`] and consumed by [`Discipline::conclude`].
pub trait Discipline: Send + Sized {
    /// Construction-time parameters that outlive individual runs.
    type Config: Send;

    const NAME: &'static str;

    /// Set up run state with `ctx.start()` queued.
    fn begin(config: &Self::Config, policy: &SearchPolicy, ctx: RunContext) -> Self;

    /// Expand at most one frontier entry.
    fn advance(&mut self) -> Advance;

    fn context(&self) -> &RunContext;

    /// Build the result and deliver the finish notification.
    fn conclude(self, reason: TerminationReason) -> SearchResult;
}

enum Lifecycle<D> {
    Uninitialized,
    Active { run: D, stepped: bool },
    Finished { result: SearchResult, metrics: Metrics },
}

/// A [`SearchAlgorithm`] driving discipline `D`.
pub struct Stepwise<D: Discipline> {
    config: D::Config,
    policy: SearchPolicy,
    lifecycle: Lifecycle<D>,
}

impl<D: Discipline> Stepwise<D> {
    #[must_use]
    pub fn with_config(policy: SearchPolicy, config: D::Config) -> Self {
        Self {
            config,
            policy,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn config(&self) -> &D::Config {
        &self.config
    }

    /// Live run state, while a run is in progress.
    #[must_use]
    pub fn run_state(&self) -> Option<&D> {
        match &self.lifecycle {
            Lifecycle::Active { run, .. } => Some(run),
            _ => None,
        }
    }

    fn conclude(&mut self, reason: TerminationReason) {
        let lifecycle = std::mem::replace(&mut self.lifecycle, Lifecycle::Uninitialized);
        if let Lifecycle::Active { run, .. } = lifecycle {
            let metrics = run.context().metrics();
            let result = run.conclude(reason);
            self.lifecycle = Lifecycle::Finished { result, metrics };
        }
    }
}

impl<D: Discipline> std::fmt::Debug for Stepwise<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepwise")
            .field("algorithm", &D::NAME)
            .field("policy", &self.policy)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<D: Discipline> SearchAlgorithm for Stepwise<D> {
    fn name(&self) -> &'static str {
        D::NAME
    }

    fn initialize(
        &mut self,
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        observer: Box<dyn SearchObserver>,
    ) -> Result<(), SearchError> {
        self.lifecycle = Lifecycle::Uninitialized;
        let ctx = RunContext::new(D::NAME, graph, start, goal, observer, &self.policy)?;
        let run = D::begin(&self.config, &self.policy, ctx);
        self.lifecycle = Lifecycle::Active {
            run,
            stepped: false,
        };
        Ok(())
    }

    fn step(&mut self) -> bool {
        match &mut self.lifecycle {
            Lifecycle::Active { run, stepped } => {
                *stepped = true;
                match run.advance() {
                    Advance::Continue => true,
                    Advance::Finish(reason) => {
                        self.conclude(reason);
                        false
                    }
                }
            }
            Lifecycle::Uninitialized => {
                tracing::warn!(algorithm = D::NAME, "step called before initialize");
                false
            }
            Lifecycle::Finished { .. } => false,
        }
    }

    fn phase(&self) -> Phase {
        match &self.lifecycle {
            Lifecycle::Uninitialized => Phase::Uninitialized,
            Lifecycle::Active { stepped: false, .. } => Phase::Initialized,
            Lifecycle::Active { stepped: true, .. } => Phase::Stepping,
            Lifecycle::Finished { .. } => Phase::Finished,
        }
    }

    fn metrics(&self) -> Metrics {
        match &self.lifecycle {
            Lifecycle::Uninitialized => Metrics::default(),
            Lifecycle::Active { run, .. } => run.context().metrics(),
            Lifecycle::Finished { metrics, .. } => *metrics,
        }
    }

    fn result(&self) -> Option<&SearchResult> {
        match &self.lifecycle {
            Lifecycle::Finished { result, .. } => Some(result),
            _ => None,
        }
    }

    fn solve(
        &mut self,
        graph: Arc<Graph>,
        start: NodeId,
        goal: NodeId,
        observer: Box<dyn SearchObserver>,
    ) -> Result<SearchResult, SearchError> {
        self.initialize(graph, start, goal, observer)?;
        loop {
            self.step();
            if let Lifecycle::Finished { result, .. } = &self.lifecycle {
                return Ok(result.clone());
            }
        }
    }
}

impl<D> Default for Stepwise<D>
where
    D: Discipline,
    D::Config: Default,
{
    fn default() -> Self {
        Self::with_config(SearchPolicy::default(), D::Config::default())
    }
}
