use crate::{GraphError, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate: adjacency-list directed graph over string-labeled nodes
///
/// Successor lists keep edge-creation order and suppress duplicates;
/// the separate insertion-order index defines `node_ids()` order and
/// the default traversal start node. All operations are synchronous;
/// shared access between the UI layer and a running traversal goes
/// through a `tokio::sync::RwLock` around the whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStore {
    /// Node identifiers in insertion order
    order: Vec<NodeId>,

    /// Successor lists keyed by node identifier
    adjacency: HashMap<String, Vec<NodeId>>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with an empty successor list
    ///
    /// The id is trimmed of surrounding whitespace first. An empty or
    /// whitespace-only id is rejected with `InvalidIdentifier`; adding
    /// an id that is already present is a silent no-op.
    pub fn add_node(&mut self, id: &str) -> Result<(), GraphError> {
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err(GraphError::InvalidIdentifier(id.to_string()));
        }

        if self.adjacency.contains_key(trimmed) {
            tracing::debug!(node = %trimmed, "Ignoring duplicate node add");
            return Ok(());
        }

        self.order.push(NodeId(trimmed.to_string()));
        self.adjacency.insert(trimmed.to_string(), Vec::new());

        Ok(())
    }

    /// Append a directed edge `from -> to`
    ///
    /// A no-op unless both endpoints already exist as nodes; duplicate
    /// edges are suppressed while first-added order is preserved.
    /// Malformed requests are deliberately not errors: the tool favors
    /// forgiving interactive use over strict validation.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = from.trim();
        let to = to.trim();

        if !self.adjacency.contains_key(from) || !self.adjacency.contains_key(to) {
            tracing::debug!(
                from = %from,
                to = %to,
                "Ignoring edge with missing endpoint"
            );
            return;
        }

        // contains_key above guarantees the entry exists
        if let Some(successors) = self.adjacency.get_mut(from) {
            if successors.iter().any(|n| n.0 == to) {
                tracing::debug!(from = %from, to = %to, "Ignoring duplicate edge");
                return;
            }
            successors.push(NodeId(to.to_string()));
        }
    }

    /// Remove a node and every reference to it
    ///
    /// Fails with `NodeNotFound` if the id is absent. On success the
    /// id is scrubbed from every other successor list, so no dangling
    /// references survive a later `neighbors` call.
    pub fn delete_node(&mut self, id: &str) -> Result<(), GraphError> {
        let id = id.trim();

        if self.adjacency.remove(id).is_none() {
            return Err(GraphError::NodeNotFound(id.to_string()));
        }

        self.order.retain(|n| n.0 != id);

        for successors in self.adjacency.values_mut() {
            successors.retain(|n| n.0 != id);
        }

        tracing::debug!(node = %id, "Deleted node and scrubbed successor lists");
        Ok(())
    }

    /// Successor list for a node, in edge-creation order
    ///
    /// Returns an empty slice for an absent id; the traversal engine
    /// relies on this defensive default rather than an error.
    pub fn neighbors(&self, id: &str) -> &[NodeId] {
        self.adjacency
            .get(id.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All node identifiers in insertion order
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Default traversal start: the first node ever inserted
    pub fn first_node(&self) -> Option<&NodeId> {
        self.order.first()
    }

    /// Whether a node id is present
    #[inline]
    pub fn contains_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id.trim())
    }

    /// Whether the graph has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// All edges as `(from, to)` pairs, grouped by source in insertion order
    ///
    /// The renderer redraws every line after a delete or a drag, so
    /// this is the full-enumeration read surface it uses.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.order.iter().flat_map(move |from| {
            self.neighbors(&from.0).iter().map(move |to| (from, to))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> GraphStore {
        // A -> B, A -> C, B -> D, C -> D
        let mut graph = GraphStore::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.add_edge("B", "D");
        graph.add_edge("C", "D");
        graph
    }

    #[test]
    fn test_add_node_trims_and_orders() {
        let mut graph = GraphStore::new();
        graph.add_node("  A  ").unwrap();
        graph.add_node("B").unwrap();

        assert_eq!(graph.node_ids(), &[NodeId::from("A"), NodeId::from("B")]);
        assert_eq!(graph.first_node(), Some(&NodeId::from("A")));
        assert!(graph.contains_node("A"));
        assert!(graph.contains_node(" A "));
    }

    #[test]
    fn test_add_node_rejects_empty_id() {
        let mut graph = GraphStore::new();

        assert_eq!(
            graph.add_node(""),
            Err(GraphError::InvalidIdentifier("".to_string()))
        );
        assert_eq!(
            graph.add_node("   "),
            Err(GraphError::InvalidIdentifier("   ".to_string()))
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_duplicate_node_add_is_noop() {
        let mut graph = GraphStore::new();
        graph.add_node("A").unwrap();
        graph.add_edge("A", "A");

        graph.add_node("A").unwrap();

        assert_eq!(graph.node_count(), 1);
        // The existing successor list is untouched
        assert_eq!(graph.neighbors("A"), &[NodeId::from("A")]);
    }

    #[test]
    fn test_node_ids_are_case_sensitive() {
        let mut graph = GraphStore::new();
        graph.add_node("a").unwrap();
        graph.add_node("A").unwrap();

        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_add_edge_missing_endpoint_leaves_graph_unchanged() {
        let mut graph = GraphStore::new();
        graph.add_node("A").unwrap();

        graph.add_edge("A", "ghost");
        graph.add_edge("ghost", "A");

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors("A").is_empty());
    }

    #[test]
    fn test_add_edge_dedups_but_keeps_order() {
        let mut graph = diamond();
        graph.add_edge("A", "B");

        assert_eq!(
            graph.neighbors("A"),
            &[NodeId::from("B"), NodeId::from("C")]
        );
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_self_loop_is_a_single_edge() {
        let mut graph = GraphStore::new();
        graph.add_node("A").unwrap();
        graph.add_edge("A", "A");
        graph.add_edge("A", "A");

        assert_eq!(graph.neighbors("A"), &[NodeId::from("A")]);
    }

    #[test]
    fn test_delete_node_scrubs_successor_lists() {
        let mut graph = diamond();

        graph.delete_node("D").unwrap();

        assert!(!graph.contains_node("D"));
        for node in ["A", "B", "C"] {
            assert!(
                !graph.neighbors(node).iter().any(|n| n.0 == "D"),
                "dangling reference to D from {}",
                node
            );
        }
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_delete_absent_node_fails() {
        let mut graph = GraphStore::new();
        graph.add_node("A").unwrap();

        assert_eq!(
            graph.delete_node("B"),
            Err(GraphError::NodeNotFound("B".to_string()))
        );
    }

    #[test]
    fn test_neighbors_of_absent_node_is_empty() {
        let graph = GraphStore::new();
        assert!(graph.neighbors("nope").is_empty());
    }

    #[test]
    fn test_edges_enumeration_follows_insertion_order() {
        let graph = diamond();
        let edges: Vec<(String, String)> = graph
            .edges()
            .map(|(from, to)| (from.0.clone(), to.0.clone()))
            .collect();

        assert_eq!(
            edges,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "D".to_string()),
                ("C".to_string(), "D".to_string()),
            ]
        );
    }

    #[test]
    fn test_store_serialization_round_trip() {
        let graph = diamond();

        let serialized = serde_json::to_string(&graph).unwrap();
        let restored: GraphStore = serde_json::from_str(&serialized).unwrap();

        assert_eq!(restored.node_ids(), graph.node_ids());
        assert_eq!(restored.neighbors("A"), graph.neighbors("A"));
    }
}
