use crate::domain::run::TraversalRunId;
use crate::types::{NodeId, TraversalMode};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt::Debug;

/// Domain event trait for everything a traversal run emits
pub trait TraversalEvent: Debug + Send + Sync {
    /// Returns the type of the event as a string
    fn event_type(&self) -> &'static str;

    /// Returns the run this event belongs to
    fn run_id(&self) -> &TraversalRunId;

    /// Returns the timestamp when the event occurred
    fn timestamp(&self) -> DateTime<Utc>;

    /// Downcast support for observers that need the concrete event
    fn as_any(&self) -> &dyn Any;
}

/// Event: a traversal run started
#[derive(Debug)]
pub struct TraversalStarted {
    /// The run that started
    pub run_id: TraversalRunId,

    /// Frontier discipline of the run
    pub mode: TraversalMode,

    /// Node the run starts from
    pub start: NodeId,

    /// The timestamp when the run started
    pub timestamp: DateTime<Utc>,
}

impl TraversalEvent for TraversalStarted {
    fn event_type(&self) -> &'static str {
        "traversal.started"
    }

    fn run_id(&self) -> &TraversalRunId {
        &self.run_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Event: a node was visited
///
/// Carries the frontier snapshot taken at the moment of the visit so
/// a renderer can highlight the node and refresh the queue/stack
/// display from a single event.
#[derive(Debug)]
pub struct NodeVisited {
    /// The run performing the visit
    pub run_id: TraversalRunId,

    /// The node just marked visited
    pub node: NodeId,

    /// Pending frontier contents right after the visit
    pub frontier: Vec<NodeId>,

    /// Zero-based position of this node in the final visit order
    pub position: usize,

    /// The timestamp of the visit
    pub timestamp: DateTime<Utc>,
}

impl TraversalEvent for NodeVisited {
    fn event_type(&self) -> &'static str {
        "traversal.node_visited"
    }

    fn run_id(&self) -> &TraversalRunId {
        &self.run_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Event: a traversal run exhausted its frontier
#[derive(Debug)]
pub struct TraversalCompleted {
    /// The run that completed
    pub run_id: TraversalRunId,

    /// Full visit order for the final sequence display
    pub order: Vec<NodeId>,

    /// The timestamp when the run completed
    pub timestamp: DateTime<Utc>,
}

impl TraversalEvent for TraversalCompleted {
    fn event_type(&self) -> &'static str {
        "traversal.completed"
    }

    fn run_id(&self) -> &TraversalRunId {
        &self.run_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Event: a traversal run was superseded before finishing
///
/// Recorded on the run for its audit trail; the engine does not
/// forward it to the observer, since a superseded run must not touch
/// shared display state.
#[derive(Debug)]
pub struct TraversalCancelled {
    /// The run that was cancelled
    pub run_id: TraversalRunId,

    /// Number of nodes visited before cancellation
    pub visited_count: usize,

    /// The timestamp of the cancellation
    pub timestamp: DateTime<Utc>,
}

impl TraversalEvent for TraversalCancelled {
    fn event_type(&self) -> &'static str {
        "traversal.cancelled"
    }

    fn run_id(&self) -> &TraversalRunId {
        &self.run_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
