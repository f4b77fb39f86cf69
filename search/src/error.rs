//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Search outcomes,
//! including "no path", are expressed via
//! [`crate::result::TerminationReason`] inside a [`crate::result::SearchResult`]
//! and are never raised as errors.

use pathstep_kernel::error::GraphError;
use pathstep_kernel::heuristic::UnknownHeuristic;
use thiserror::Error;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchResult` is produced because no steps were taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start or goal does not belong to the graph being searched.
    #[error("invalid {role} node: {source}")]
    InvalidEndpoint {
        role: &'static str,
        #[source]
        source: GraphError,
    },

    /// A policy document could not be parsed.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// An algorithm name did not match any discipline.
    #[error("unknown search algorithm: {name}")]
    UnknownAlgorithm { name: String },

    /// A heuristic name did not match any built-in estimator.
    #[error(transparent)]
    UnknownHeuristic(#[from] UnknownHeuristic),
}
