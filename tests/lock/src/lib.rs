//! Shared fixtures and reference oracles for the lock tests.
//!
//! Fixtures are deterministic: the same call always builds the same graph
//! with the same node ids and edge order, so expansion digests taken from
//! them are stable across processes.

pub mod reference;
