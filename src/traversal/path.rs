//! Root paths, common ancestors and shortest paths.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use log::warn;

use crate::graph::GraphStore;

/// Follow the first outbound edge with `label` from `start` until none is left.
///
/// The walk stops if it would revisit a node, so a cyclic hierarchy still
/// yields a finite path.
pub fn root_path<'a>(graph: &'a GraphStore, start: &'a str, label: &str) -> Vec<&'a str> {
    let mut path = vec![start];
    let mut seen: AHashSet<&str> = AHashSet::new();
    seen.insert(start);

    let mut current = start;
    while let Some(edge) = graph
        .outbound(current)
        .iter()
        .find(|edge| edge.label == label)
    {
        let next = edge.peer.as_str();
        if !seen.insert(next) {
            warn!("'{label}' relations form a cycle through '{next}', stopping root path at '{current}'");
            break;
        }
        path.push(next);
        current = next;
    }

    path
}

/// First node of `first` that also lies on `second`.
pub fn lowest_common_ancestor<'a>(first: &[&'a str], second: &[&str]) -> Option<&'a str> {
    let second: AHashSet<&str> = second.iter().copied().collect();
    first.iter().copied().find(|id| second.contains(id))
}

/// Breadth-first shortest path over outbound edges, endpoints included.
///
/// With `allowed` set, only edges whose label is in it are followed.
pub fn shortest_path<'a>(
    graph: &'a GraphStore,
    source: &'a str,
    target: &str,
    allowed: Option<&AHashSet<&str>>,
) -> Option<Vec<&'a str>> {
    if source == target {
        return Some(vec![source]);
    }

    let mut parents: AHashMap<&'a str, &'a str> = AHashMap::new();
    let mut visited: AHashSet<&'a str> = AHashSet::new();
    visited.insert(source);
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        for edge in graph.outbound(current) {
            if allowed.is_some_and(|labels| !labels.contains(edge.label.as_str())) {
                continue;
            }
            let next = edge.peer.as_str();
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            if next == target {
                return Some(unwind(&parents, next));
            }
            queue.push_back(next);
        }
    }

    None
}

fn unwind<'a>(parents: &AHashMap<&'a str, &'a str>, end: &'a str) -> Vec<&'a str> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&parent) = parents.get(current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
