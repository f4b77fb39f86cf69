//! Pathstep Search: stepwise, observable graph search.
//!
//! Every discipline is a resumable state machine. A driver calls
//! `initialize`, then `step` as often as it likes, inspecting progress in
//! between; a run driven that way ends with exactly the result `solve`
//! would have returned. This crate depends only on `pathstep_kernel`.
//!
//! # Crate dependency graph
//!
//! ```text
//! pathstep_kernel  ←  pathstep_search  ←  pathstep_harness
//! (graph, hashing)    (disciplines)        (drivers, observers, logging)
//! ```
//!
//! # Key types
//!
//! - [`contract::SearchAlgorithm`] -- the object-safe step/solve surface
//! - [`contract::Stepwise`] -- lifecycle shared by all disciplines
//! - [`algorithms::AlgorithmKind`] -- name-based selector and factory
//! - [`observer::SearchObserver`] -- per-step and finish notifications
//! - [`result::SearchResult`] -- immutable record of a finished run
//! - [`policy::SearchPolicy`] -- serde-configurable knobs

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod metrics;
pub mod observer;
pub mod policy;
pub mod result;
pub mod run;
pub mod tree;

pub use algorithms::{AStar, AlgorithmKind, BreadthFirst, DepthFirst, GreedyBestFirst, IterativeDeepening};
pub use contract::{Phase, SearchAlgorithm};
pub use error::SearchError;
pub use observer::{NoopObserver, Scores, SearchObserver, StepEvent};
pub use policy::SearchPolicy;
pub use result::{SearchResult, TerminationReason};
