//! Directed labeled multigraph over synset ids.
//!
//! The store treats ids as opaque node keys and knows nothing about synsets.
//! Parallel edges between the same ordered pair are allowed as long as their
//! labels differ; the single-edge-per-pair rule lives in the lexicon's
//! mutation API, not here.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// One end of a labeled edge, seen from the other end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The node at the far end of the edge.
    pub peer: String,
    /// Relation label.
    pub label: String,
}

/// A fully specified edge: source, label, target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationTriple {
    pub source: String,
    pub label: String,
    pub target: String,
}

impl RelationTriple {
    pub fn new<S, L, T>(source: S, label: L, target: T) -> Self
    where
        S: Into<String>,
        L: Into<String>,
        T: Into<String>,
    {
        RelationTriple {
            source: source.into(),
            label: label.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Adjacency {
    outbound: Vec<Edge>,
    inbound: Vec<Edge>,
}

/// Adjacency-list multigraph keyed by node id.
///
/// Outbound and inbound lists keep edge insertion order, which is the
/// enumeration order every traversal relies on.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: AHashMap<String, Adjacency>,
    /// Node ids in insertion order.
    order: Vec<String>,
    edge_count: usize,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` if it already existed.
    pub fn add_node(&mut self, id: &str) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        self.nodes.insert(id.to_string(), Adjacency::default());
        self.order.push(id.to_string());
        true
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add a labeled edge, creating missing endpoints.
    ///
    /// Returns `false` without touching the graph if the exact
    /// (source, target, label) triple is already present.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) -> bool {
        if self.has_labeled_edge(source, target, label) {
            return false;
        }
        self.add_node(source);
        self.add_node(target);

        if let Some(adjacency) = self.nodes.get_mut(source) {
            adjacency.outbound.push(Edge {
                peer: target.to_string(),
                label: label.to_string(),
            });
        }
        if let Some(adjacency) = self.nodes.get_mut(target) {
            adjacency.inbound.push(Edge {
                peer: source.to_string(),
                label: label.to_string(),
            });
        }
        self.edge_count += 1;
        true
    }

    /// Remove every edge source -> target, returning the removed labels.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<Vec<String>> {
        if !self.has_edge(source, target) {
            return Err(LexiconError::edge_not_found(source, target));
        }

        let mut removed = Vec::new();
        if let Some(adjacency) = self.nodes.get_mut(source) {
            adjacency.outbound.retain(|edge| {
                if edge.peer == target {
                    removed.push(edge.label.clone());
                    false
                } else {
                    true
                }
            });
        }
        if let Some(adjacency) = self.nodes.get_mut(target) {
            adjacency.inbound.retain(|edge| edge.peer != source);
        }
        self.edge_count -= removed.len();
        Ok(removed)
    }

    /// Outbound edges of a node; empty for unknown nodes.
    pub fn outbound(&self, id: &str) -> &[Edge] {
        self.nodes
            .get(id)
            .map(|adjacency| adjacency.outbound.as_slice())
            .unwrap_or(&[])
    }

    /// Inbound edges of a node; empty for unknown nodes.
    pub fn inbound(&self, id: &str) -> &[Edge] {
        self.nodes
            .get(id)
            .map(|adjacency| adjacency.inbound.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any edge source -> target exists, regardless of label.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.outbound(source).iter().any(|edge| edge.peer == target)
    }

    pub fn has_labeled_edge(&self, source: &str, target: &str, label: &str) -> bool {
        self.outbound(source)
            .iter()
            .any(|edge| edge.peer == target && edge.label == label)
    }

    /// All edges as (source, edge) pairs, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &Edge)> {
        self.order.iter().flat_map(move |source| {
            self.outbound(source)
                .iter()
                .map(move |edge| (source.as_str(), edge))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = GraphStore::new();
        assert!(graph.add_node("a"));
        assert!(!graph.add_node("a"));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_nodes() {
        let mut graph = GraphStore::new();
        assert!(graph.add_edge("a", "b", "hypernym"));
        assert!(graph.contains_node("a"));
        assert!(graph.contains_node("b"));
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_parallel_labels_allowed() {
        let mut graph = GraphStore::new();
        assert!(graph.add_edge("a", "b", "hypernym"));
        assert!(graph.add_edge("a", "b", "near_synonym"));
        assert!(!graph.add_edge("a", "b", "hypernym"));
        assert_eq!(graph.outbound("a").len(), 2);
        assert_eq!(graph.inbound("b").len(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        graph.add_edge("a", "b", "y");
        graph.add_edge("a", "c", "x");

        let removed = graph.remove_edge("a", "b").unwrap();
        assert_eq!(removed, vec!["x".to_string(), "y".to_string()]);
        assert!(!graph.has_edge("a", "b"));
        assert!(graph.inbound("b").is_empty());
        assert!(graph.has_edge("a", "c"));
        assert_eq!(graph.edge_count(), 1);

        assert!(matches!(
            graph.remove_edge("a", "b"),
            Err(LexiconError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_enumeration_order() {
        let mut graph = GraphStore::new();
        graph.add_node("root");
        graph.add_edge("a", "root", "hypernym");
        graph.add_edge("a", "b", "antonym");
        graph.add_edge("b", "root", "hypernym");

        let outbound: Vec<&str> = graph.outbound("a").iter().map(|e| e.peer.as_str()).collect();
        assert_eq!(outbound, vec!["root", "b"]);

        let inbound: Vec<&str> = graph.inbound("root").iter().map(|e| e.peer.as_str()).collect();
        assert_eq!(inbound, vec!["a", "b"]);

        let edges: Vec<(&str, &str)> = graph.edges().map(|(s, e)| (s, e.peer.as_str())).collect();
        assert_eq!(edges, vec![("a", "root"), ("a", "b"), ("b", "root")]);
    }

    #[test]
    fn test_labeled_edge_lookup() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        assert!(graph.has_labeled_edge("a", "b", "x"));
        assert!(!graph.has_labeled_edge("a", "b", "y"));
        assert!(!graph.has_labeled_edge("b", "a", "x"));
        assert!(graph.outbound("missing").is_empty());
    }
}
