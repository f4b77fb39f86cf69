//! Canonical hashing with domain separation.
//!
//! **Exactly one place defines canonical hashing.** Every digest in the
//! workspace is `SHA-256(domain_prefix || data)` rendered as
//! `"sha256:<hex_digest>"`.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    fn from_sha256(bytes: &[u8]) -> Self {
        let full = format!("sha256:{}", hex::encode(bytes));
        Self { full, colon: 6 }
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for expansion-sequence digests.
pub const DOMAIN_EXPANSION_TRACE: &[u8] = b"PATHSTEP::EXPANSION_TRACE::V1\0";

/// Domain prefix for graph structure digests.
pub const DOMAIN_GRAPH: &[u8] = b"PATHSTEP::GRAPH::V1\0";

/// Compute the canonical hash of a byte slice with domain separation.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = CanonicalHasher::new(domain);
    hasher.update(data);
    hasher.finish()
}

/// Streaming form of [`canonical_hash`] for data produced incrementally.
///
/// `CanonicalHasher::new(d)` fed `x` then `y` yields the same hash as
/// `canonical_hash(d, x ++ y)`.
#[derive(Debug, Clone)]
pub struct CanonicalHasher {
    inner: Sha256,
}

impl CanonicalHasher {
    #[must_use]
    pub fn new(domain: &[u8]) -> Self {
        let mut inner = Sha256::new();
        inner.update(domain);
        Self { inner }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Hash of everything fed so far. The hasher is left untouched.
    #[must_use]
    pub fn snapshot(&self) -> ContentHash {
        ContentHash::from_sha256(&self.inner.clone().finalize())
    }

    #[must_use]
    pub fn finish(self) -> ContentHash {
        ContentHash::from_sha256(&self.inner.finalize())
    }
}

/// Structural digest of a graph: node names, coordinates and edges in
/// insertion order.
#[must_use]
pub fn graph_digest(graph: &crate::graph::Graph) -> ContentHash {
    let mut hasher = CanonicalHasher::new(DOMAIN_GRAPH);
    for id in graph.node_ids() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let name = node.name().as_bytes();
        hasher.update(&(name.len() as u64).to_le_bytes());
        hasher.update(name);
        hasher.update(&node.x().to_le_bytes());
        hasher.update(&node.y().to_le_bytes());
        let edges = graph.edges_from(id);
        hasher.update(&(edges.len() as u64).to_le_bytes());
        for edge in edges {
            hasher.update(&edge.to.to_le_bytes());
            hasher.update(&edge.cost.to_le_bytes());
        }
    }
    hasher.finish()
}
