//! Recording observer and its JSON rendering.
//!
//! A [`Transcript`] is a shared log; [`Transcript::observer`] hands out an
//! observer that appends to it. Node ids are resolved to names at record
//! time, so the rendered transcript is readable without the graph.
//!
//! Rendering is deterministic: object keys are sorted and nothing
//! time-dependent is included, so two runs of the same search on the same
//! graph render byte-identical transcripts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::NodeId;
use pathstep_search::metrics::Metrics;
use pathstep_search::observer::{Scores, SearchObserver, StepEvent};
use pathstep_search::result::SearchResult;

/// One expansion as recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub node: String,
    pub depth: u32,
    pub path_cost: f64,
    pub scores: Scores,
    /// Frontier after the pop, in expansion order.
    pub frontier: Vec<String>,
    pub explored_len: usize,
    pub metrics: Metrics,
}

#[derive(Debug, Default)]
struct Log {
    steps: Vec<StepRecord>,
    finishes: Vec<SearchResult>,
}

/// Shared recording of one or more runs.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    log: Arc<Mutex<Log>>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that appends to this transcript.
    #[must_use]
    pub fn observer(&self) -> TranscriptObserver {
        TranscriptObserver {
            log: Arc::clone(&self.log),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn steps(&self) -> Vec<StepRecord> {
        self.lock().steps.clone()
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.lock().steps.len()
    }

    /// Expanded node names in order.
    #[must_use]
    pub fn expansion_names(&self) -> Vec<String> {
        self.lock().steps.iter().map(|s| s.node.clone()).collect()
    }

    /// Number of finish notifications received.
    #[must_use]
    pub fn finish_count(&self) -> usize {
        self.lock().finishes.len()
    }

    /// The most recent finish notification.
    #[must_use]
    pub fn result(&self) -> Option<SearchResult> {
        self.lock().finishes.last().cloned()
    }

    /// Deterministic JSON form.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let log = self.lock();
        let steps: Vec<serde_json::Value> = log
            .steps
            .iter()
            .enumerate()
            .map(|(index, s)| {
                serde_json::json!({
                    "depth": s.depth,
                    "explored_len": s.explored_len,
                    "f": s.scores.f,
                    "frontier": s.frontier,
                    "g": s.scores.g,
                    "h": s.scores.h,
                    "node": s.node,
                    "nodes_expanded": s.metrics.nodes_expanded,
                    "nodes_generated": s.metrics.nodes_generated,
                    "path_cost": s.path_cost,
                    "step_index": index,
                })
            })
            .collect();
        let finishes: Vec<serde_json::Value> = log
            .finishes
            .iter()
            .map(|r| {
                let mut v = r.to_json_value();
                if let Some(map) = v.as_object_mut() {
                    map.remove("elapsed_millis");
                }
                v
            })
            .collect();
        serde_json::json!({
            "finish_count": finishes.len(),
            "finishes": finishes,
            "schema_version": "pathstep_transcript.v1",
            "step_count": steps.len(),
            "steps": steps,
        })
    }

    /// Compact JSON bytes of [`Transcript::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }
}

/// Observer half of a [`Transcript`].
#[derive(Debug, Clone)]
pub struct TranscriptObserver {
    log: Arc<Mutex<Log>>,
}

fn name_of(graph: &Graph, id: NodeId) -> String {
    graph
        .node(id)
        .map_or_else(|| id.to_string(), |n| n.name().to_string())
}

impl SearchObserver for TranscriptObserver {
    fn on_step(&mut self, graph: &Graph, event: &StepEvent) {
        let record = StepRecord {
            node: name_of(graph, event.node),
            depth: event.depth,
            path_cost: event.path_cost,
            scores: event.scores,
            frontier: event.frontier.iter().map(|&id| name_of(graph, id)).collect(),
            explored_len: event.explored.len(),
            metrics: event.metrics,
        };
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .steps
            .push(record);
    }

    fn on_finish(&mut self, _graph: &Graph, result: &SearchResult) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finishes
            .push(result.clone());
    }
}
