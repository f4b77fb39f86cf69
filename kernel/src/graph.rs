//! Weighted directed graph with ordered adjacency lists.
//!
//! Nodes live in a dense table indexed by [`NodeId`]; each node owns an
//! ordered list of outgoing edges. Edge order is insertion order and is
//! significant: depth-first disciplines expand neighbours in this order.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::node::{Node, NodeId};

/// A directed edge to `to` with traversal cost `cost`.
///
/// Costs are expected to be non-negative; the graph does not check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub cost: f64,
}

/// A weighted directed graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Edge>>,
    by_name: HashMap<String, NodeId>,
    edge_count: usize,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its id.
    ///
    /// Idempotent by name: adding a node whose name is already present
    /// returns the existing id and keeps the first node's coordinates and
    /// attributes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CapacityExceeded`] if a new node would need an
    /// id past `u32::MAX`.
    pub fn try_add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if let Some(&id) = self.by_name.get(node.name()) {
            return Ok(id);
        }
        let len = self.nodes.len();
        let id = NodeId::new(u32::try_from(len).map_err(|_| GraphError::CapacityExceeded { len })?);
        self.by_name.insert(node.name().to_string(), id);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Infallible [`Graph::try_add_node`] for graphs known to fit.
    ///
    /// # Panics
    ///
    /// Panics with [`GraphError::CapacityExceeded`] if the graph already
    /// holds `u32::MAX + 1` nodes.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        match self.try_add_node(node) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Append a directed edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownId`] if either endpoint is not a node of
    /// this graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cost: f64) -> Result<(), GraphError> {
        self.check(to)?;
        let edges = self
            .adjacency
            .get_mut(from.index())
            .ok_or(GraphError::UnknownId {
                id: from,
                len: self.nodes.len(),
            })?;
        edges.push(Edge { to, cost });
        self.edge_count += 1;
        Ok(())
    }

    /// Add both nodes (if missing) and a directed edge between them.
    ///
    /// # Panics
    ///
    /// Same as [`Graph::add_node`].
    pub fn connect(&mut self, from: &Node, to: &Node, cost: f64) -> (NodeId, NodeId) {
        let a = self.add_node(from.clone());
        let b = self.add_node(to.clone());
        self.adjacency[a.index()].push(Edge { to: b, cost });
        self.edge_count += 1;
        (a, b)
    }

    /// Add both nodes and a directed edge in each direction.
    ///
    /// # Panics
    ///
    /// Same as [`Graph::add_node`].
    pub fn connect_both(&mut self, a: &Node, b: &Node, cost: f64) -> (NodeId, NodeId) {
        let (ia, ib) = self.connect(a, b, cost);
        self.adjacency[ib.index()].push(Edge { to: ia, cost });
        self.edge_count += 1;
        (ia, ib)
    }

    /// Outgoing edges of `id` in insertion order (empty for unknown ids).
    #[must_use]
    pub fn edges_from(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Cheapest direct edge cost `from -> to`, if any edge exists.
    #[must_use]
    pub fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edges_from(from)
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.cost)
            .reduce(f64::min)
    }

    /// Sum of edge costs along consecutive pairs of `path`.
    ///
    /// Returns `None` if a consecutive pair is not connected. Empty and
    /// single-node paths cost zero.
    #[must_use]
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_cost(pair[0], pair[1]))
            .sum()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Look up a node id by name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownName`] if no such node exists.
    pub fn require(&self, name: &str) -> Result<NodeId, GraphError> {
        self.node_id(name).ok_or_else(|| GraphError::UnknownName {
            name: name.to_string(),
        })
    }

    /// Confirm that `id` belongs to this graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownId`] otherwise.
    pub fn check(&self, id: NodeId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownId {
                id,
                len: self.nodes.len(),
            })
        }
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(|i| NodeId::new(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Resolve a sequence of ids to node names, skipping unknown ids.
    #[must_use]
    pub fn names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.node(id))
            .map(|n| n.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
