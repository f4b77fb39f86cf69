//! Frontier containers and the explored set.
//!
//! Every container pairs its ordered storage with a membership set kept in
//! lockstep, so "is this node queued?" is O(1) regardless of discipline.
//! Snapshots list nodes in the order they would be expanded.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use pathstep_kernel::node::NodeId;

use crate::policy::TieBreak;

/// First-in first-out frontier (breadth-first).
#[derive(Debug, Clone, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
    members: HashSet<NodeId>,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `node` unless it is already queued. Returns `true` if added.
    pub fn push(&mut self, node: NodeId) -> bool {
        if !self.members.insert(node) {
            return false;
        }
        self.queue.push_back(node);
        true
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        let node = self.queue.pop_front()?;
        self.members.remove(&node);
        Some(node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued nodes, head first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.queue.iter().copied().collect()
    }
}

/// Last-in first-out frontier (depth-first).
#[derive(Debug, Clone, Default)]
pub struct StackFrontier {
    stack: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl StackFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `node` unless it is already on the stack. Returns `true` if added.
    pub fn push(&mut self, node: NodeId) -> bool {
        if !self.members.insert(node) {
            return false;
        }
        self.stack.push(node);
        true
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.members.remove(&node);
        Some(node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Stacked nodes, top first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.stack.iter().rev().copied().collect()
    }
}

/// A depth-limited stack frame: the node, the depth it was reached at, and
/// the edge it was reached through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthFrame {
    pub node: NodeId,
    pub depth: u32,
    /// `None` for the start node.
    pub via: Option<(NodeId, f64)>,
}

/// Stack of [`DepthFrame`]s for iterative deepening.
///
/// A node may appear in more than one frame when it is reachable at several
/// depths; membership is decided by the caller against its explored depths.
#[derive(Debug, Clone, Default)]
pub struct DepthStack {
    frames: Vec<DepthFrame>,
}

impl DepthStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: DepthFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<DepthFrame> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Stacked nodes, top first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.frames.iter().rev().map(|f| f.node).collect()
    }
}

/// Total ordering key for priority frontiers.
///
/// Lower sorts first: `priority`, then `secondary` (derived from the
/// [`TieBreak`] policy), then `seq`, the push sequence number. `seq` is
/// unique per frontier, so no two keys compare equal.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub priority: f64,
    pub secondary: u64,
    pub seq: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.secondary.cmp(&other.secondary))
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityEntry {
    key: FrontierKey,
    node: NodeId,
}

/// Min-priority frontier (greedy best-first and A*).
///
/// Pushing a node that is already queued supersedes its previous entry: the
/// old entry stays in the heap but is discarded when it reaches the top.
/// The live map records the `seq` of each node's current entry.
#[derive(Debug, Clone)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<PriorityEntry>>,
    live: HashMap<NodeId, u64>,
    tie_break: TieBreak,
    next_seq: u64,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            tie_break,
            next_seq: 0,
        }
    }

    /// Queue `node` at `priority`, superseding any entry it already has.
    ///
    /// Returns `true` if the node was not queued before.
    pub fn push(&mut self, node: NodeId, priority: f64) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        let secondary = match self.tie_break {
            TieBreak::Fifo => 0,
            TieBreak::Lifo => u64::MAX - seq,
            TieBreak::NodeOrder => node.index() as u64,
        };
        self.heap.push(Reverse(PriorityEntry {
            key: FrontierKey {
                priority,
                secondary,
                seq,
            },
            node,
        }));
        self.live.insert(node, seq).is_none()
    }

    /// Remove and return the lowest-keyed live node with its priority.
    pub fn pop(&mut self) -> Option<(NodeId, f64)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.live.get(&entry.node) == Some(&entry.key.seq) {
                self.live.remove(&entry.node);
                return Some((entry.node, entry.key.priority));
            }
        }
        None
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.live.contains_key(&node)
    }

    /// Number of distinct queued nodes. Superseded entries do not count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Heap entries including superseded ones.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.heap.len()
    }

    /// Live nodes in pop order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NodeId> {
        let mut entries: Vec<&PriorityEntry> = self
            .heap
            .iter()
            .map(|Reverse(e)| e)
            .filter(|e| self.live.get(&e.node) == Some(&e.key.seq))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries.into_iter().map(|e| e.node).collect()
    }
}

/// Nodes already expanded, in first-expansion order.
#[derive(Debug, Clone, Default)]
pub struct ExploredSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl ExploredSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` explored. Returns `false` if it already was.
    pub fn insert(&mut self, node: NodeId) -> bool {
        if !self.members.insert(node) {
            return false;
        }
        self.order.push(node);
        true
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.order.clone()
    }
}
