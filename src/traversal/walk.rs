//! Lazy breadth-first walk over outbound relations.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use ahash::AHashSet;

use crate::graph::GraphStore;

/// One synset reached by a walk, with the relation used to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep<'a> {
    pub synset_id: &'a str,
    /// Label of the edge `predecessor -> synset_id`.
    pub relation: &'a str,
    pub predecessor: &'a str,
}

/// Breadth-first iterator over everything reachable from a start node.
///
/// Each node is yielded at most once and the start node is never yielded.
/// Neighbors are discovered in outbound edge insertion order, and a node's
/// neighbors are queued when the node itself is yielded, so the walk only
/// does as much work as the caller consumes.
#[derive(Debug, Clone)]
pub struct BreadthFirstWalk<'a> {
    graph: &'a GraphStore,
    queue: VecDeque<WalkStep<'a>>,
    visited: AHashSet<&'a str>,
}

impl<'a> BreadthFirstWalk<'a> {
    pub fn new(graph: &'a GraphStore, start: &'a str) -> Self {
        let mut walk = BreadthFirstWalk {
            graph,
            queue: VecDeque::new(),
            visited: AHashSet::new(),
        };
        walk.visited.insert(start);
        walk.discover(start);
        walk
    }

    /// Nodes seen so far, including the start and everything still queued.
    pub fn discovered(&self) -> usize {
        self.visited.len()
    }

    fn discover(&mut self, from: &'a str) {
        let graph = self.graph;
        for edge in graph.outbound(from) {
            if self.visited.insert(edge.peer.as_str()) {
                self.queue.push_back(WalkStep {
                    synset_id: &edge.peer,
                    relation: &edge.label,
                    predecessor: from,
                });
            }
        }
    }
}

impl<'a> Iterator for BreadthFirstWalk<'a> {
    type Item = WalkStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.queue.pop_front()?;
        self.discover(step.synset_id);
        Some(step)
    }
}

impl FusedIterator for BreadthFirstWalk<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(walk: BreadthFirstWalk<'a>) -> Vec<&'a str> {
        walk.map(|step| step.synset_id).collect()
    }

    #[test]
    fn test_walk_excludes_start() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        graph.add_edge("a", "c", "y");
        graph.add_edge("b", "d", "x");

        assert_eq!(ids(BreadthFirstWalk::new(&graph, "a")), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_walk_steps_carry_predecessor() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        graph.add_edge("b", "c", "y");

        let steps: Vec<WalkStep> = BreadthFirstWalk::new(&graph, "a").collect();
        assert_eq!(
            steps,
            vec![
                WalkStep { synset_id: "b", relation: "x", predecessor: "a" },
                WalkStep { synset_id: "c", relation: "y", predecessor: "b" },
            ]
        );
    }

    #[test]
    fn test_walk_terminates_on_cycles() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        graph.add_edge("b", "c", "x");
        graph.add_edge("c", "a", "x");
        graph.add_edge("c", "b", "y");

        assert_eq!(ids(BreadthFirstWalk::new(&graph, "a")), vec!["b", "c"]);
    }

    #[test]
    fn test_walk_is_lazy() {
        let mut graph = GraphStore::new();
        graph.add_edge("a", "b", "x");
        graph.add_edge("b", "c", "x");
        graph.add_edge("c", "d", "x");

        let mut walk = BreadthFirstWalk::new(&graph, "a");
        assert_eq!(walk.discovered(), 2);
        assert_eq!(walk.next().map(|s| s.synset_id), Some("b"));
        assert_eq!(walk.discovered(), 3);
    }

    #[test]
    fn test_walk_isolated_node() {
        let mut graph = GraphStore::new();
        graph.add_node("a");
        let mut walk = BreadthFirstWalk::new(&graph, "a");
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }
}
