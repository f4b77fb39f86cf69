//! Pathstep Kernel: the graph model searched by `pathstep_search`.
//!
//! # API Surface
//!
//! - [`graph::Graph`] -- weighted directed graph with ordered adjacency lists
//! - [`node::Node`] / [`node::NodeId`] -- name-keyed node identity and its dense index
//! - [`heuristic::Heuristic`] -- remaining-cost estimators (zero, Manhattan, Euclidean, Chebyshev)
//! - [`hash::canonical_hash`] -- the single domain-separated SHA-256 routine
//!
//! # Module Dependency Direction
//!
//! `node` ← `graph` ← `hash`, and `node` ← `heuristic`.
//!
//! The kernel knows nothing about search; it is read-only input to it.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod graph;
pub mod hash;
pub mod heuristic;
pub mod node;
