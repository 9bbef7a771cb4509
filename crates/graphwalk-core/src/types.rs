use serde::{Deserialize, Serialize};

use crate::domain::run::TraversalRunId;

/// Value object: Node ID
///
/// Node identifiers are case-sensitive, trimmed of surrounding
/// whitespace on entry, and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Borrow the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// Frontier discipline for a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalMode {
    /// Breadth-first: FIFO frontier, visits in non-decreasing edge distance
    Bfs,

    /// Depth-first: LIFO frontier, explores a full branch before backtracking
    Dfs,
}

impl TraversalMode {
    /// Stable lowercase name, used in logs and event payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalMode::Bfs => "bfs",
            TraversalMode::Dfs => "dfs",
        }
    }
}

/// Traversal run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is created but not started
    Idle,

    /// Run is visiting nodes
    Running,

    /// Run exhausted its frontier
    Completed,

    /// Run was superseded by a newer traversal
    Cancelled,
}

/// Final outcome of a traversal run, immutable once returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Identifier of the run that produced this result
    pub run_id: TraversalRunId,

    /// Frontier discipline the run used
    pub mode: TraversalMode,

    /// Node the traversal started from
    pub start: NodeId,

    /// Full visit order; each reachable node appears exactly once
    pub order: Vec<NodeId>,

    /// Completed for a finished run, Cancelled for a superseded one
    pub status: RunStatus,
}
