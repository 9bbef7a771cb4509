//! An observer that records every traversal it sees, for inspection or replay.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use graphwalk_core::{
    GraphError, NodeId, NodeVisited, TraversalCancelled, TraversalCompleted, TraversalEvent,
    TraversalMode, TraversalObserver, TraversalRunId, TraversalStarted,
};
use tokio::sync::RwLock;
use tracing::warn;

/// A single visit captured from a running traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStep {
    /// The node that was visited.
    pub node: NodeId,
    /// Nodes still pending when this step fired.
    pub frontier: Vec<NodeId>,
    /// Zero-based position of this step within its run.
    pub position: usize,
}

/// Everything recorded about one traversal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    /// The run this record belongs to.
    pub run_id: TraversalRunId,
    /// Which strategy the run used.
    pub mode: TraversalMode,
    /// The node the run started from.
    pub start: NodeId,
    /// Steps in the order they were observed.
    pub steps: Vec<RecordedStep>,
    /// Final visit order, present once the run completed.
    pub order: Option<Vec<NodeId>>,
    /// Whether the run was cancelled before finishing.
    pub cancelled: bool,
}

impl RecordedRun {
    fn started(event: &TraversalStarted) -> Self {
        Self {
            run_id: event.run_id.clone(),
            mode: event.mode,
            start: event.start.clone(),
            steps: Vec::new(),
            order: None,
            cancelled: false,
        }
    }
}

/// Captures every event into shared memory, keyed by run.
///
/// Useful in tests and anywhere a consumer wants to inspect a finished
/// traversal rather than react to it step by step.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    runs: Arc<RwLock<HashMap<String, RecordedRun>>>,
    completed_order: Arc<RwLock<Vec<String>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for one run.
    pub async fn run(&self, run_id: &TraversalRunId) -> Option<RecordedRun> {
        self.runs.read().await.get(&run_id.0).cloned()
    }

    /// All recorded runs, in the order they finished (completed or cancelled).
    pub async fn finished_runs(&self) -> Vec<RecordedRun> {
        let runs = self.runs.read().await;
        self.completed_order
            .read()
            .await
            .iter()
            .filter_map(|id| runs.get(id).cloned())
            .collect()
    }

    /// Number of runs seen so far, finished or not.
    pub async fn run_count(&self) -> usize {
        self.runs.read().await.len()
    }

    /// Drop all recorded state.
    pub async fn clear(&self) {
        self.runs.write().await.clear();
        self.completed_order.write().await.clear();
    }
}

#[async_trait]
impl TraversalObserver for RecordingObserver {
    async fn handle_event(&self, event: Box<dyn TraversalEvent>) -> Result<(), GraphError> {
        if let Some(started) = event.as_any().downcast_ref::<TraversalStarted>() {
            self.runs
                .write()
                .await
                .insert(started.run_id.0.clone(), RecordedRun::started(started));
        } else if let Some(visit) = event.as_any().downcast_ref::<NodeVisited>() {
            let mut runs = self.runs.write().await;
            match runs.get_mut(&visit.run_id.0) {
                Some(run) => run.steps.push(RecordedStep {
                    node: visit.node.clone(),
                    frontier: visit.frontier.clone(),
                    position: visit.position,
                }),
                None => warn!(run_id = %visit.run_id.0, "visit for unknown run"),
            }
        } else if let Some(done) = event.as_any().downcast_ref::<TraversalCompleted>() {
            let mut runs = self.runs.write().await;
            if let Some(run) = runs.get_mut(&done.run_id.0) {
                run.order = Some(done.order.clone());
            }
            self.completed_order.write().await.push(done.run_id.0.clone());
        } else if let Some(cancelled) = event.as_any().downcast_ref::<TraversalCancelled>() {
            let mut runs = self.runs.write().await;
            if let Some(run) = runs.get_mut(&cancelled.run_id.0) {
                run.cancelled = true;
            }
            self.completed_order
                .write()
                .await
                .push(cancelled.run_id.0.clone());
        }
        Ok(())
    }
}
