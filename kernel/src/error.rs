//! Typed graph construction and lookup errors.

use thiserror::Error;

use crate::node::NodeId;

/// Failure to build or query a [`crate::graph::Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No node with this name was added to the graph.
    #[error("unknown node name: {name}")]
    UnknownName { name: String },

    /// The id does not index a node of this graph.
    #[error("node id {id} is out of range (graph has {len} nodes)")]
    UnknownId { id: NodeId, len: usize },

    /// The node table already holds every id a [`NodeId`] can express.
    #[error("graph is full: {len} nodes is the most a NodeId can index")]
    CapacityExceeded { len: usize },
}
