//! Search policy: the tunable knobs shared by every discipline.
//!
//! Defaults give the textbook behaviour of each discipline; fields whose
//! default is a choice between variants say so (`requeue`, `tie_break`).

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default iterative-deepening safety cap.
pub const DEFAULT_MAX_DEPTH_CAP: u32 = 1000;

/// Search configuration.
///
/// Every field has a default, so a policy document only needs to name the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Deepest limit iterative deepening will try before reporting failure.
    pub max_depth_cap: u32,
    /// What A* does when a node already on the frontier gets a cheaper `g`.
    pub requeue: RequeuePolicy,
    /// Secondary ordering for equal priority keys.
    pub tie_break: TieBreak,
    /// Whether heuristic estimates are validated before use.
    pub heuristic_check: HeuristicCheck,
    /// Build frontier/explored snapshots for observers on every step.
    pub capture_snapshots: bool,
    /// Let iterative deepening stop as soon as a depth-limited pass
    /// completes without pruning anything at the limit.
    pub stop_on_exhausted_pass: bool,
}

impl SearchPolicy {
    /// Parse a JSON policy document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the document is not valid
    /// JSON, names an unknown field, or uses an unknown enum variant.
    pub fn from_json(text: &str) -> Result<Self, SearchError> {
        serde_json::from_str(text).map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })
    }

    /// Render as a JSON document accepted by [`SearchPolicy::from_json`].
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_depth_cap: DEFAULT_MAX_DEPTH_CAP,
            requeue: RequeuePolicy::Lazy,
            tie_break: TieBreak::Fifo,
            heuristic_check: HeuristicCheck::Trust,
            capture_snapshots: true,
            stop_on_exhausted_pass: false,
        }
    }
}

/// Re-prioritisation of frontier entries after an A* relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequeuePolicy {
    /// Push a second entry carrying the improved key. Entries whose `g` no
    /// longer matches the node's best `g` are discarded when popped.
    /// Default.
    Lazy,
    /// Leave the existing entry where it is. The node is still expanded with
    /// its improved `g`, but its position in the queue reflects the key it
    /// had when first pushed.
    Never,
}

/// Ordering among frontier entries whose priority keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earliest pushed first. Default.
    Fifo,
    /// Latest pushed first.
    Lifo,
    /// Lowest node id (graph insertion order) first.
    NodeOrder,
}

/// Treatment of heuristic estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicCheck {
    /// Use estimates as returned. Default.
    Trust,
    /// Replace NaN or negative estimates with `0.0` and log a warning.
    Sanitize,
}

impl HeuristicCheck {
    /// Apply this check to one estimate.
    #[must_use]
    pub fn apply(self, estimate: f64) -> f64 {
        match self {
            Self::Trust => estimate,
            Self::Sanitize if estimate.is_nan() || estimate < 0.0 => {
                tracing::warn!(estimate, "heuristic returned an invalid estimate; using 0");
                0.0
            }
            Self::Sanitize => estimate,
        }
    }
}
