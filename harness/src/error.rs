//! Harness errors.

use pathstep_search::error::SearchError;
use thiserror::Error;

/// Failure while setting up or collecting a driven search.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Pre-flight validation of the search failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The background search thread could not be started.
    #[error("failed to spawn search worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The background search thread panicked.
    #[error("search worker panicked: {detail}")]
    WorkerPanicked { detail: String },
}
