use thiserror::Error;

/// Core error type for the Graphwalk runtime
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Traversal requested on a graph with no nodes
    #[error("Graph has no nodes; add at least one node before traversing")]
    EmptyGraph,

    /// Lookup or delete on a node id that is not in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Empty or whitespace-only node id on add
    #[error("Invalid node identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Run state machine violation (not user-visible in normal operation)
    #[error("Invalid run state: {0}")]
    InvalidState(String),
}
