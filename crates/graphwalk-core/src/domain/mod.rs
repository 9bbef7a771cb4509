//! Domain layer - the graph store, traversal runs, and their events

/// The adjacency-list graph store
pub mod graph;

/// Traversal run aggregate and its state machine
pub mod run;

/// Domain events emitted by traversal runs
pub mod events;
