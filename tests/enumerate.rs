// tests/enumerate.rs

mod common;
use crate::common::builders::GraphBuilder;
use crate::common::hops;

use std::collections::BTreeSet;

use navgraph::errors::NavError;
use navgraph::graph::NavGraph;
use navgraph::pathfinding::{DEFAULT_MAX_ALTERNATIVES, all_simple_paths, reachable};

fn diamond() -> NavGraph {
    GraphBuilder::new()
        .edge("A", "B")
        .edge("B", "D")
        .edge("A", "C")
        .edge("C", "D")
        .edge("A", "D")
        .edge("B", "C")
        .build()
}

fn node_paths(graph: &NavGraph, start: &str, target: &str, max: usize) -> Vec<Vec<String>> {
    all_simple_paths(graph, start, target, max)
        .unwrap()
        .iter()
        .map(|path| {
            let mut ids: Vec<String> = Vec::new();
            for (from, to) in hops(path) {
                if ids.is_empty() {
                    ids.push(from);
                }
                ids.push(to);
            }
            ids
        })
        .collect()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_default_limit_returns_shortest_paths_first() {
    let graph = diamond();

    let paths = node_paths(&graph, "A", "D", DEFAULT_MAX_ALTERNATIVES);
    assert_eq!(
        paths,
        vec![ids(&["A", "D"]), ids(&["A", "B", "D"]), ids(&["A", "C", "D"])]
    );
}

#[test]
fn test_larger_limit_lists_every_simple_path() {
    let graph = diamond();

    let paths = node_paths(&graph, "A", "D", 10);
    assert_eq!(paths.len(), 4);
    assert_eq!(paths[3], ids(&["A", "B", "C", "D"]));

    let lengths: Vec<usize> = paths.iter().map(Vec::len).collect();
    let mut sorted = lengths.clone();
    sorted.sort();
    assert_eq!(lengths, sorted);
}

#[test]
fn test_transitions_are_numbered_per_path() {
    let graph = diamond();

    let paths = all_simple_paths(&graph, "A", "D", 3).unwrap();
    for path in &paths {
        let steps: Vec<usize> = path.iter().map(|t| t.step).collect();
        let expected: Vec<usize> = (1..=path.len()).collect();
        assert_eq!(steps, expected);
    }
}

#[test]
fn test_zero_limit_and_same_node_yield_nothing() {
    let graph = diamond();

    assert!(all_simple_paths(&graph, "A", "D", 0).unwrap().is_empty());
    assert!(all_simple_paths(&graph, "B", "B", 5).unwrap().is_empty());
}

#[test]
fn test_cycles_are_not_revisited() {
    let graph = GraphBuilder::new()
        .bidir("A", "B")
        .edge("B", "C")
        .edge("C", "A")
        .build();

    let paths = node_paths(&graph, "A", "C", 5);
    assert_eq!(paths, vec![ids(&["A", "B", "C"])]);
}

#[test]
fn test_unknown_endpoints_are_rejected() {
    let graph = diamond();

    assert!(matches!(
        all_simple_paths(&graph, "A", "Z", 3),
        Err(NavError::NodeNotFound(id)) if id == "Z"
    ));
    assert!(matches!(
        all_simple_paths(&NavGraph::new(), "A", "B", 3),
        Err(NavError::EmptyGraph)
    ));
}

#[test]
fn test_reachable_includes_start_and_follows_direction() {
    let graph = GraphBuilder::new()
        .bidir("A", "B")
        .edge("B", "C")
        .edge("D", "A")
        .build();

    let from_a = reachable(&graph, "A").unwrap();
    let expected: BTreeSet<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    assert_eq!(from_a, expected);

    let from_c = reachable(&graph, "C").unwrap();
    assert_eq!(from_c, BTreeSet::from(["C".to_string()]));

    let from_d = reachable(&graph, "D").unwrap();
    assert_eq!(from_d.len(), 4);
}

#[test]
fn test_reachable_unknown_node() {
    let graph = diamond();

    match reachable(&graph, "nope") {
        Err(err) => assert_eq!(err.reason(), "node_not_found"),
        Ok(set) => panic!("expected NodeNotFound, got {:?}", set),
    }
}

fn complete_graph(size: usize) -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    for a in 0..size {
        for b in 0..size {
            if a != b {
                builder = builder.edge(&format!("k{a}"), &format!("k{b}"));
            }
        }
    }
    builder
}

#[test]
fn test_unreachable_target_on_dense_graph_returns_immediately() {
    let graph = complete_graph(12).node("island").build();

    let paths = all_simple_paths(&graph, "k0", "island", 3).unwrap();
    assert!(paths.is_empty());
}

#[test]
fn test_dense_graph_lists_shortest_then_lexical() {
    let graph = complete_graph(12).build();

    let paths = node_paths(&graph, "k0", "k11", 3);
    assert_eq!(
        paths,
        vec![
            ids(&["k0", "k11"]),
            ids(&["k0", "k1", "k11"]),
            ids(&["k0", "k10", "k11"]),
        ]
    );
}

#[test]
fn test_long_only_route_is_found() {
    // The only simple path to E runs through every node.
    let graph = GraphBuilder::new()
        .chain(&["A", "B", "C", "D", "E"])
        .edge("B", "A")
        .edge("C", "A")
        .edge("D", "B")
        .build();

    let paths = node_paths(&graph, "A", "E", 3);
    assert_eq!(paths, vec![ids(&["A", "B", "C", "D", "E"])]);
}
