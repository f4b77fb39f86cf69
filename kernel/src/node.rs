//! Graph node identity and attributes.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Coordinate value used when a node has no position.
pub const NO_COORDINATE: f64 = -1.0;

/// Attribute key generators use to mark impassable cells.
pub const ATTR_BLOCKED: &str = "blocked";

/// Dense node index assigned by [`crate::graph::Graph`] at insertion.
///
/// Ordering follows insertion order, which makes it usable as a
/// deterministic tie-break key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Build an id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the node in its graph's node table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Little-endian encoding, used when hashing expansion sequences.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value in a node's attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[derive(Debug)]
struct NodeData {
    name: String,
    x: f64,
    y: f64,
    attributes: BTreeMap<String, AttrValue>,
}

/// An immutable graph node.
///
/// Identity is the name alone: equality, hashing and ordering ignore
/// coordinates and attributes. Cloning is cheap (shared handle), so nodes can
/// be copied into results and snapshots freely.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeData>,
}

impl Node {
    /// A node without coordinates.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        NodeBuilder::new(name).build()
    }

    /// A node positioned at `(x, y)`.
    #[must_use]
    pub fn with_coords(name: impl Into<String>, x: f64, y: f64) -> Self {
        NodeBuilder::new(name).coords(x, y).build()
    }

    /// Start a builder for a node with attributes.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    /// True unless both coordinates carry the [`NO_COORDINATE`] sentinel.
    #[must_use]
    pub fn has_coords(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let unset = self.inner.x == NO_COORDINATE && self.inner.y == NO_COORDINATE;
        !unset
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.inner.attributes.get(key)
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.inner.attributes.contains_key(key)
    }

    /// Whether a generator marked this node impassable.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self.attribute(ATTR_BLOCKED), Some(AttrValue::Bool(true)))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.name.cmp(&other.inner.name)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_coords() {
            write!(f, "Node({} @ {},{})", self.inner.name, self.inner.x, self.inner.y)
        } else {
            write!(f, "Node({})", self.inner.name)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

/// Builder for [`Node`]; attributes can only be set before the node is shared.
#[derive(Debug)]
pub struct NodeBuilder {
    name: String,
    x: f64,
    y: f64,
    attributes: BTreeMap<String, AttrValue>,
}

impl NodeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x: NO_COORDINATE,
            y: NO_COORDINATE,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn coords(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn blocked(self, blocked: bool) -> Self {
        self.attribute(ATTR_BLOCKED, blocked)
    }

    #[must_use]
    pub fn build(self) -> Node {
        Node {
            inner: Arc::new(NodeData {
                name: self.name,
                x: self.x,
                y: self.y,
                attributes: self.attributes,
            }),
        }
    }
}
