use crate::{
    domain::events::{
        NodeVisited, TraversalCancelled, TraversalCompleted, TraversalEvent, TraversalStarted,
    },
    types::{NodeId, RunStatus, TraversalMode, TraversalResult},
    GraphError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Value object: Traversal Run ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraversalRunId(pub String);

/// Aggregate: a single traversal run
///
/// Owns the `Idle -> Running -> Completed` state machine, the visited
/// set, the visit order, and the pending frontier. Every state change
/// records a domain event; the engine drains them with `take_events`
/// and forwards them to its observer.
#[derive(Debug)]
pub struct TraversalRun {
    /// Unique identifier
    pub id: TraversalRunId,

    /// Frontier discipline
    pub mode: TraversalMode,

    /// Node the run starts from
    pub start: NodeId,

    /// Current status
    pub status: RunStatus,

    /// Pending frontier: queue for BFS, stack for DFS
    pub frontier: VecDeque<NodeId>,

    /// Visit order so far
    pub order: Vec<NodeId>,

    /// Identifiers already visited
    visited: HashSet<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,

    /// Domain events pending dispatch
    events: Vec<Box<dyn TraversalEvent>>,
}

impl TraversalRun {
    /// Create a new run with the frontier seeded with the start node
    pub fn new(mode: TraversalMode, start: NodeId) -> Self {
        let now = Utc::now();
        let mut frontier = VecDeque::with_capacity(16);
        frontier.push_back(start.clone());

        Self {
            id: TraversalRunId(Uuid::new_v4().to_string()),
            mode,
            start,
            status: RunStatus::Idle,
            frontier,
            order: Vec::with_capacity(16),
            visited: HashSet::with_capacity(16),
            created_at: now,
            updated_at: now,
            events: Vec::with_capacity(8),
        }
    }

    /// Start the run
    pub fn start(&mut self) -> Result<(), GraphError> {
        if self.status != RunStatus::Idle {
            return Err(GraphError::InvalidState(format!(
                "cannot start run in state: {:?}",
                self.status
            )));
        }

        self.status = RunStatus::Running;
        self.update_timestamp();

        self.record_event(Box::new(TraversalStarted {
            run_id: self.id.clone(),
            mode: self.mode,
            start: self.start.clone(),
            timestamp: Utc::now(),
        }));

        Ok(())
    }

    /// Remove the next frontier entry per the run's discipline
    ///
    /// BFS takes from the front (FIFO), DFS from the back (LIFO).
    pub fn next_frontier_entry(&mut self) -> Option<NodeId> {
        match self.mode {
            TraversalMode::Bfs => self.frontier.pop_front(),
            TraversalMode::Dfs => self.frontier.pop_back(),
        }
    }

    /// Whether a node id has already been visited
    #[inline]
    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// Mark a node visited and record the step event
    ///
    /// The frontier snapshot in the event is taken right after the
    /// node left the frontier, which is what the queue/stack display
    /// should show while the node is highlighted.
    pub fn visit(&mut self, node: NodeId) -> Result<(), GraphError> {
        if self.status != RunStatus::Running {
            return Err(GraphError::InvalidState(format!(
                "cannot visit while run is in state: {:?}",
                self.status
            )));
        }

        self.visited.insert(node.0.clone());
        self.order.push(node.clone());

        self.record_event(Box::new(NodeVisited {
            run_id: self.id.clone(),
            node,
            frontier: self.frontier.iter().cloned().collect(),
            position: self.order.len() - 1,
            timestamp: Utc::now(),
        }));

        self.update_timestamp();
        Ok(())
    }

    /// Push unvisited successors onto the frontier
    ///
    /// BFS appends in listed order; DFS pushes in reverse listed order
    /// so LIFO popping still explores siblings left-to-right, matching
    /// BFS's sibling convention.
    pub fn extend_frontier(&mut self, successors: &[NodeId]) {
        match self.mode {
            TraversalMode::Bfs => {
                for node in successors {
                    if !self.is_visited(&node.0) {
                        self.frontier.push_back(node.clone());
                    }
                }
            }
            TraversalMode::Dfs => {
                for node in successors.iter().rev() {
                    if !self.is_visited(&node.0) {
                        self.frontier.push_back(node.clone());
                    }
                }
            }
        }
    }

    /// Complete the run after frontier exhaustion
    pub fn complete(&mut self) -> Result<(), GraphError> {
        if self.status != RunStatus::Running {
            return Err(GraphError::InvalidState(format!(
                "cannot complete run in state: {:?}",
                self.status
            )));
        }

        self.status = RunStatus::Completed;

        self.record_event(Box::new(TraversalCompleted {
            run_id: self.id.clone(),
            order: self.order.clone(),
            timestamp: Utc::now(),
        }));

        self.update_timestamp();
        Ok(())
    }

    /// Cancel the run after it was superseded
    pub fn cancel(&mut self) -> Result<(), GraphError> {
        if self.status != RunStatus::Running {
            return Err(GraphError::InvalidState(format!(
                "cannot cancel run in state: {:?}",
                self.status
            )));
        }

        self.status = RunStatus::Cancelled;
        self.frontier.clear();

        self.record_event(Box::new(TraversalCancelled {
            run_id: self.id.clone(),
            visited_count: self.order.len(),
            timestamp: Utc::now(),
        }));

        self.update_timestamp();
        Ok(())
    }

    /// Record a domain event
    pub fn record_event(&mut self, event: Box<dyn TraversalEvent>) {
        self.events.push(event);
    }

    /// Get and clear all pending domain events
    pub fn take_events(&mut self) -> Vec<Box<dyn TraversalEvent>> {
        std::mem::take(&mut self.events)
    }

    /// Freeze the run into its immutable result
    pub fn into_result(self) -> TraversalResult {
        TraversalResult {
            run_id: self.id,
            mode: self.mode,
            start: self.start,
            order: self.order,
            status: self.status,
        }
    }

    /// Update the timestamp
    #[inline]
    fn update_timestamp(&mut self) {
        self.updated_at = Utc::now();
    }
}
