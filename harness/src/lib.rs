//! Pathstep Harness: drivers and observers around the search engine.
//!
//! The harness steps algorithms, hands their events to other threads and
//! records what they did. It does NOT implement search logic; it delegates
//! to `pathstep_search`.
//!
//! - [`runner`] -- step budgets, cancellation, run-every-algorithm batches
//! - [`channel`] -- background worker with channel hand-off of events
//! - [`transcript`] -- recording observer with deterministic JSON rendering
//! - [`logging`] -- `tracing` subscriber bootstrap

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod channel;
pub mod error;
pub mod logging;
pub mod runner;
pub mod transcript;
