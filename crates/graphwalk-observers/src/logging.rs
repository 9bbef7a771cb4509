//! An observer that narrates traversal runs through `tracing`.

use async_trait::async_trait;
use graphwalk_core::{
    GraphError, NodeVisited, TraversalCancelled, TraversalCompleted, TraversalEvent,
    TraversalObserver, TraversalStarted,
};
use tracing::info;

/// Emits one structured log line per traversal event.
///
/// Handy as a default observer for command-line demos and for tailing a
/// running engine with `RUST_LOG=graphwalk_observers=info`.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Create a new tracing observer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TraversalObserver for TracingObserver {
    async fn handle_event(&self, event: Box<dyn TraversalEvent>) -> Result<(), GraphError> {
        if let Some(started) = event.as_any().downcast_ref::<TraversalStarted>() {
            info!(
                run_id = %started.run_id.0,
                mode = started.mode.as_str(),
                start = %started.start.0,
                "Traversal started"
            );
        } else if let Some(visit) = event.as_any().downcast_ref::<NodeVisited>() {
            info!(
                run_id = %visit.run_id.0,
                node = %visit.node.0,
                position = visit.position,
                frontier_len = visit.frontier.len(),
                "Visited node"
            );
        } else if let Some(done) = event.as_any().downcast_ref::<TraversalCompleted>() {
            info!(
                run_id = %done.run_id.0,
                visited = done.order.len(),
                "Traversal completed"
            );
        } else if let Some(cancelled) = event.as_any().downcast_ref::<TraversalCancelled>() {
            info!(
                run_id = %cancelled.run_id.0,
                visited = cancelled.visited_count,
                "Traversal cancelled"
            );
        } else {
            info!(event_type = event.event_type(), "Traversal event");
        }
        Ok(())
    }
}
