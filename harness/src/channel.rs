//! Background search with channel hand-off.
//!
//! The worker thread owns the algorithm; the caller only sees owned
//! [`SearchEvent`]s arriving on a channel. Endpoint validation happens on
//! the calling thread so errors surface before anything is spawned.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use pathstep_kernel::graph::Graph;
use pathstep_search::contract::SearchAlgorithm;
use pathstep_search::observer::{SearchObserver, StepEvent};
use pathstep_search::result::SearchResult;

use crate::error::HarnessError;
use crate::runner::{CancelToken, DriveOutcome, Driver, Problem};

/// One notification forwarded from a running search.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Step(StepEvent),
    Finished(SearchResult),
}

/// Observer that forwards every notification over a channel.
///
/// A dropped receiver is not an error; the run continues unobserved.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: Sender<SearchEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(tx: Sender<SearchEvent>) -> Self {
        Self { tx }
    }

    /// An observer and the receiving end of its channel.
    #[must_use]
    pub fn pair() -> (Self, Receiver<SearchEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl SearchObserver for ChannelObserver {
    fn on_step(&mut self, _graph: &Graph, event: &StepEvent) {
        if self.tx.send(SearchEvent::Step(event.clone())).is_err() {
            tracing::trace!("step event dropped: receiver gone");
        }
    }

    fn on_finish(&mut self, _graph: &Graph, result: &SearchResult) {
        if self.tx.send(SearchEvent::Finished(result.clone())).is_err() {
            tracing::trace!("finish event dropped: receiver gone");
        }
    }
}

/// Handle to a search running on its own thread.
#[derive(Debug)]
pub struct BackgroundSearch {
    events: Receiver<SearchEvent>,
    cancel: CancelToken,
    worker: JoinHandle<DriveOutcome>,
}

impl BackgroundSearch {
    /// Events in the order the search produced them.
    #[must_use]
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    /// Ask the worker to stop before its next step.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Wait for the worker and return how its drive ended.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::WorkerPanicked`] if the worker thread panicked.
    pub fn join(self) -> Result<DriveOutcome, HarnessError> {
        join_worker(self.worker)
    }

    /// Wait for the worker, then drain the events still queued.
    ///
    /// # Errors
    ///
    /// Same as [`BackgroundSearch::join`].
    pub fn finish(self) -> Result<(DriveOutcome, Vec<SearchEvent>), HarnessError> {
        let outcome = join_worker(self.worker)?;
        Ok((outcome, self.events.try_iter().collect()))
    }
}

fn join_worker(worker: JoinHandle<DriveOutcome>) -> Result<DriveOutcome, HarnessError> {
    worker.join().map_err(|panic| HarnessError::WorkerPanicked {
        detail: panic
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string()),
    })
}

/// Initialize `algorithm` on `problem` here, then drive it on a new thread.
///
/// The driver gets a fresh cancel token wired to the returned handle; any
/// token already on `driver` is replaced.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] if initialization fails. Nothing is
/// spawned in that case.
pub fn spawn_search(
    mut algorithm: Box<dyn SearchAlgorithm>,
    problem: &Problem,
    driver: Driver,
) -> Result<BackgroundSearch, HarnessError> {
    let (observer, events) = ChannelObserver::pair();
    problem.initialize(algorithm.as_mut(), Box::new(observer))?;
    let cancel = CancelToken::new();
    let driver = driver.with_cancel(cancel.clone());
    let name = algorithm.name();
    let worker = thread::Builder::new()
        .name(format!("search-{name}"))
        .spawn(move || driver.drive(algorithm.as_mut()))?;
    tracing::debug!(algorithm = name, "search worker spawned");
    Ok(BackgroundSearch {
        events,
        cancel,
        worker,
    })
}
