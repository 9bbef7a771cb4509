use crate::{
    config::TraversalConfig,
    domain::events::TraversalEvent,
    domain::graph::GraphStore,
    domain::run::TraversalRun,
    types::{NodeId, TraversalMode, TraversalResult},
    GraphError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Handler for traversal events
///
/// The rendering/UI layer implements this to receive one event per
/// visited node (highlight + frontier display) and one completion
/// event carrying the final visit sequence.
#[async_trait]
pub trait TraversalObserver: Send + Sync {
    /// Handle a traversal event
    async fn handle_event(&self, event: Box<dyn TraversalEvent>) -> Result<(), GraphError>;
}

/// Service for running paced, observable graph traversals
///
/// A new `traverse` call supersedes any run still in flight: the old
/// run sees the bumped generation counter at its next checkpoint and
/// stops without emitting further events. Graph mutations interleave
/// freely with a running traversal; the engine reads the live store
/// at every expansion, so a mid-run edit yields a run over a mix of
/// old and new structure (single-user, human-paced, acceptable).
pub struct TraversalService {
    /// The shared graph store
    graph: Arc<RwLock<GraphStore>>,

    /// Observer receiving step and completion events
    observer: Arc<dyn TraversalObserver>,

    /// Generation counter; a run is live while its tag is current
    generation: Arc<AtomicU64>,

    /// Pacing configuration
    config: TraversalConfig,
}

impl TraversalService {
    /// Create a new traversal service with default pacing
    pub fn new(graph: Arc<RwLock<GraphStore>>, observer: Arc<dyn TraversalObserver>) -> Self {
        Self::with_config(graph, observer, TraversalConfig::default())
    }

    /// Create a new traversal service with explicit pacing bounds
    pub fn with_config(
        graph: Arc<RwLock<GraphStore>>,
        observer: Arc<dyn TraversalObserver>,
        config: TraversalConfig,
    ) -> Self {
        Self {
            graph,
            observer,
            generation: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    /// Handle to the shared graph store, for the CRUD/read surface
    pub fn graph(&self) -> Arc<RwLock<GraphStore>> {
        self.graph.clone()
    }

    /// Cancel any in-flight traversal without starting a new one
    ///
    /// The reset control uses this to clear the animation.
    pub fn cancel_active(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Run a traversal from `start` (default: first inserted node)
    ///
    /// Emits `TraversalStarted`, one `NodeVisited` per step with a
    /// `step_delay` pause after each, and `TraversalCompleted` on
    /// frontier exhaustion. Returns the partial result with
    /// `RunStatus::Cancelled` if a newer traversal superseded this
    /// one; a superseded run emits nothing after being superseded.
    pub async fn traverse(
        &self,
        start: Option<&str>,
        mode: TraversalMode,
        step_delay: Option<Duration>,
    ) -> Result<TraversalResult, GraphError> {
        // Tag this run and supersede any run still in flight
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.config.clamp_delay(step_delay);

        let start_node = {
            let graph = self.graph.read().await;

            if graph.is_empty() {
                return Err(GraphError::EmptyGraph);
            }

            match start {
                Some(id) => {
                    let id = id.trim();
                    if !graph.contains_node(id) {
                        return Err(GraphError::NodeNotFound(id.to_string()));
                    }
                    NodeId(id.to_string())
                }
                None => graph.first_node().cloned().ok_or(GraphError::EmptyGraph)?,
            }
        };

        let mut run = TraversalRun::new(mode, start_node);
        run.start()?;
        self.dispatch(&mut run).await?;

        info!(
            run_id = %run.id.0,
            mode = %mode.as_str(),
            start = %run.start.0,
            step_delay_ms = delay.as_millis() as u64,
            "Traversal started"
        );

        while let Some(node) = run.next_frontier_entry() {
            // Fan-in duplicates: skip without a step, an event, or a delay
            if run.is_visited(node.as_str()) {
                continue;
            }

            if self.is_superseded(generation) {
                return self.abandon(run);
            }

            run.visit(node.clone())?;
            self.dispatch(&mut run).await?;

            debug!(
                run_id = %run.id.0,
                node = %node.0,
                visited = run.order.len(),
                pending = run.frontier.len(),
                "Visited node"
            );

            // Cooperative pacing: let the host render before the next step
            tokio::time::sleep(delay).await;

            if self.is_superseded(generation) {
                return self.abandon(run);
            }

            // Read the live store: concurrent edits are reflected here
            let successors = {
                let graph = self.graph.read().await;
                graph.neighbors(node.as_str()).to_vec()
            };

            run.extend_frontier(&successors);
        }

        run.complete()?;
        self.dispatch(&mut run).await?;

        info!(
            run_id = %run.id.0,
            visited = run.order.len(),
            "Traversal completed"
        );

        Ok(run.into_result())
    }

    /// Whether a newer traversal has taken over this run's generation
    #[inline]
    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Finish a superseded run without observing any of its events
    fn abandon(&self, mut run: TraversalRun) -> Result<TraversalResult, GraphError> {
        run.cancel()?;
        // The cancellation event stays on the run's audit trail only
        run.take_events();

        info!(
            run_id = %run.id.0,
            visited = run.order.len(),
            "Traversal superseded by a newer run"
        );

        Ok(run.into_result())
    }

    /// Dispatch pending domain events to the observer
    async fn dispatch(&self, run: &mut TraversalRun) -> Result<(), GraphError> {
        for event in run.take_events() {
            self.observer.handle_event(event).await?;
        }

        Ok(())
    }
}

impl Clone for TraversalService {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            observer: self.observer.clone(),
            generation: self.generation.clone(),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RunStatus;
    use pretty_assertions::assert_eq;
    use tokio::sync::Mutex;

    /// Records (event_type, node) pairs for assertions
    struct RecordingObserver {
        events: Arc<Mutex<Vec<(String, Option<String>)>>>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                events: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn visited(&self) -> Vec<String> {
            self.events
                .lock()
                .await
                .iter()
                .filter_map(|(ty, node)| {
                    if ty == "traversal.node_visited" {
                        node.clone()
                    } else {
                        None
                    }
                })
                .collect()
        }

        async fn event_count(&self) -> usize {
            self.events.lock().await.len()
        }
    }

    #[async_trait]
    impl TraversalObserver for RecordingObserver {
        async fn handle_event(&self, event: Box<dyn TraversalEvent>) -> Result<(), GraphError> {
            let node = event
                .as_any()
                .downcast_ref::<crate::domain::events::NodeVisited>()
                .map(|visit| visit.node.0.clone());

            self.events
                .lock()
                .await
                .push((event.event_type().to_string(), node));
            Ok(())
        }
    }

    fn fast_config() -> TraversalConfig {
        TraversalConfig {
            default_step_delay_ms: 1,
            min_step_delay_ms: 0,
            max_step_delay_ms: 10,
        }
    }

    async fn diamond() -> Arc<RwLock<GraphStore>> {
        let mut graph = GraphStore::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "D");
        Arc::new(RwLock::new(graph))
    }

    fn service(
        graph: Arc<RwLock<GraphStore>>,
    ) -> (TraversalService, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let service = TraversalService::with_config(graph, observer.clone(), fast_config());
        (service, observer)
    }

    #[tokio::test]
    async fn test_bfs_diamond_order() {
        let (service, observer) = service(diamond().await);

        let result = service
            .traverse(None, TraversalMode::Bfs, None)
            .await
            .unwrap();

        let order: Vec<String> = result.order.iter().map(|n| n.0.clone()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(observer.visited().await, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_dfs_diamond_order_with_reverse_push_tie_break() {
        let (service, _observer) = service(diamond().await);

        let result = service
            .traverse(None, TraversalMode::Dfs, None)
            .await
            .unwrap();

        let order: Vec<String> = result.order.iter().map(|n| n.0.clone()).collect();
        assert_eq!(order, vec!["A", "B", "D", "C"]);
    }

    #[tokio::test]
    async fn test_empty_graph_fails_without_events() {
        let (service, observer) = service(Arc::new(RwLock::new(GraphStore::new())));

        let result = service.traverse(None, TraversalMode::Bfs, None).await;

        assert_eq!(result, Err(GraphError::EmptyGraph));
        assert_eq!(observer.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_start_node_fails() {
        let (service, observer) = service(diamond().await);

        let result = service
            .traverse(Some("ghost"), TraversalMode::Bfs, None)
            .await;

        assert_eq!(result, Err(GraphError::NodeNotFound("ghost".to_string())));
        assert_eq!(observer.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_explicit_start_node() {
        let (service, _observer) = service(diamond().await);

        let result = service
            .traverse(Some("B"), TraversalMode::Bfs, None)
            .await
            .unwrap();

        let order: Vec<String> = result.order.iter().map(|n| n.0.clone()).collect();
        // Only B and D are reachable from B
        assert_eq!(order, vec!["B", "D"]);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_idempotent() {
        let (service, _observer) = service(diamond().await);

        let first = service
            .traverse(None, TraversalMode::Dfs, None)
            .await
            .unwrap();
        let second = service
            .traverse(None, TraversalMode::Dfs, None)
            .await
            .unwrap();

        assert_eq!(first.order, second.order);
    }

    #[tokio::test]
    async fn test_unreachable_nodes_are_never_visited() {
        let graph = diamond().await;
        graph.write().await.add_node("island").unwrap();
        let (service, _observer) = service(graph);

        let result = service
            .traverse(None, TraversalMode::Bfs, None)
            .await
            .unwrap();

        assert!(!result.order.iter().any(|n| n.0 == "island"));
        assert_eq!(result.order.len(), 4);
    }
}
