//!
//! Graphwalk Core - graph store and traversal engine
//!
//! This crate defines the core of the Graphwalk teaching tool: an
//! adjacency-list directed graph over string-labeled nodes, and an
//! animated BFS/DFS traversal engine that emits one observable event
//! per visited node. Rendering (node highlights, the queue/stack
//! display, SVG lines) lives outside this crate and consumes the
//! engine through the `TraversalObserver` trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - the graph store, runs, and events
pub mod domain;

/// Application services - the traversal engine
pub mod application;

/// Core types
pub mod types;

/// Error types
pub mod error;

/// Pacing configuration
pub mod config;

// Re-export key types
pub use config::TraversalConfig;
pub use error::GraphError;
pub use types::{NodeId, RunStatus, TraversalMode, TraversalResult};

// Re-export main API types for easy use
pub use application::traversal_service::{TraversalObserver, TraversalService};
pub use domain::events::{
    NodeVisited, TraversalCancelled, TraversalCompleted, TraversalEvent, TraversalStarted,
};
pub use domain::graph::GraphStore;
pub use domain::run::{TraversalRun, TraversalRunId};
