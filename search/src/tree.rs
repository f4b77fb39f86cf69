//! Search tree: parent links rooted at the start node.
//!
//! Each entry records the node's parent, its hop depth and its
//! cost-from-start along the tree. Path reconstruction walks parent links
//! from a node back to the root.

use std::collections::HashMap;

use pathstep_kernel::node::NodeId;

/// One node's position in the search tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEntry {
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    pub depth: u32,
    /// Cost-from-start along the tree path at the time of linking.
    pub cost: f64,
}

/// Parent map plus depth and cost bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    entries: HashMap<NodeId, TreeEntry>,
}

impl SearchTree {
    /// A tree holding only `root`.
    #[must_use]
    pub fn rooted(root: NodeId) -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            root,
            TreeEntry {
                parent: None,
                depth: 0,
                cost: 0.0,
            },
        );
        Self { entries }
    }

    /// Make `parent` the parent of `child` across an edge of `edge_cost`,
    /// replacing any previous link. Returns the new entry.
    pub fn link(&mut self, child: NodeId, parent: NodeId, edge_cost: f64) -> TreeEntry {
        let (depth, cost) = self
            .entries
            .get(&parent)
            .map_or((1, edge_cost), |p| (p.depth + 1, p.cost + edge_cost));
        let entry = TreeEntry {
            parent: Some(parent),
            depth,
            cost,
        };
        self.entries.insert(child, entry);
        entry
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&TreeEntry> {
        self.entries.get(&node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    #[must_use]
    pub fn cost(&self, node: NodeId) -> Option<f64> {
        self.entries.get(&node).map(|e| e.cost)
    }

    #[must_use]
    pub fn depth(&self, node: NodeId) -> Option<u32> {
        self.entries.get(&node).map(|e| e.depth)
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entries.get(&node).and_then(|e| e.parent)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Root-to-`goal` path.
    ///
    /// Returns `None` if `goal` was never linked, or if the parent chain is
    /// broken or cyclic.
    #[must_use]
    pub fn path_to(&self, goal: NodeId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(id) = current {
            if path.len() > self.entries.len() {
                tracing::error!(goal = %goal, "parent chain is cyclic");
                return None;
            }
            let entry = self.entries.get(&id)?;
            path.push(id);
            current = entry.parent;
        }
        path.reverse();
        Some(path)
    }
}
