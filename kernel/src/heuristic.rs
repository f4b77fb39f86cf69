//! Remaining-cost estimators for informed search.
//!
//! A heuristic is a pure function of `(current, goal)`. The four built-in
//! estimators read node coordinates; nodes without coordinates carry the
//! `-1,-1` sentinel and are measured as such.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::node::Node;

/// Estimate of the cost remaining from `current` to `goal`.
///
/// Implementations should return a finite, non-negative value. The search
/// engine does not enforce this unless its policy asks it to.
pub trait Heuristic: Send + Sync {
    /// Estimated cost from `current` to `goal`.
    fn estimate(&self, current: &Node, goal: &Node) -> f64;

    /// Stable identifier used in reports.
    fn name(&self) -> &'static str;
}

/// Always zero. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _current: &Node, _goal: &Node) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}

/// `|dx| + |dy|`, admissible on 4-connected unit grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, current: &Node, goal: &Node) -> f64 {
        (current.x() - goal.x()).abs() + (current.y() - goal.y()).abs()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanHeuristic;

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, current: &Node, goal: &Node) -> f64 {
        (current.x() - goal.x()).hypot(current.y() - goal.y())
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// `max(|dx|, |dy|)`, admissible on 8-connected unit grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChebyshevHeuristic;

impl Heuristic for ChebyshevHeuristic {
    fn estimate(&self, current: &Node, goal: &Node) -> f64 {
        (current.x() - goal.x())
            .abs()
            .max((current.y() - goal.y()).abs())
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}

/// Selector for the built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeuristicKind {
    #[default]
    Zero,
    Manhattan,
    Euclidean,
    Chebyshev,
}

impl HeuristicKind {
    pub const ALL: [Self; 4] = [
        Self::Zero,
        Self::Manhattan,
        Self::Euclidean,
        Self::Chebyshev,
    ];

    /// Instantiate the estimator.
    #[must_use]
    pub fn build(self) -> Arc<dyn Heuristic> {
        match self {
            Self::Zero => Arc::new(ZeroHeuristic),
            Self::Manhattan => Arc::new(ManhattanHeuristic),
            Self::Euclidean => Arc::new(EuclideanHeuristic),
            Self::Chebyshev => Arc::new(ChebyshevHeuristic),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name did not match any built-in heuristic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heuristic: {0}")]
pub struct UnknownHeuristic(pub String);

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "none" => Ok(Self::Zero),
            "manhattan" => Ok(Self::Manhattan),
            "euclidean" => Ok(Self::Euclidean),
            "chebyshev" => Ok(Self::Chebyshev),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}
