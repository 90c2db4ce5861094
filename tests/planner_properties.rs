// tests/planner_properties.rs

use std::collections::BTreeSet;

use navgraph::errors::NavError;
use navgraph::graph::{EdgeKey, NavGraph};
use navgraph::pathfinding::{PathOutcome, all_simple_paths, find_path};
use navgraph::planner::cleanup::check_continuity;
use navgraph::planner::plan_validation_sequence;
use navgraph_test_utils::builders::GraphBuilder;
use proptest::prelude::*;

// Random directed graph with up to `max_nodes` nodes named n0, n1, ...
// Self-loops are allowed; duplicate edges are folded.
fn graph_strategy(max_nodes: usize) -> impl Strategy<Value = NavGraph> {
    (1..=max_nodes).prop_flat_map(|num_nodes| {
        let edges = proptest::collection::vec((0..num_nodes, 0..num_nodes), 0..num_nodes * 3);
        let entry = proptest::option::of(0..num_nodes);

        (edges, entry).prop_map(move |(raw_edges, entry)| {
            let mut builder = GraphBuilder::new();
            for i in 0..num_nodes {
                builder = builder.node(&format!("n{i}"));
            }
            if let Some(e) = entry {
                builder = builder.entry_point(&format!("n{e}"));
            }
            let unique: BTreeSet<(usize, usize)> = raw_edges.into_iter().collect();
            for (a, b) in unique {
                builder = builder.edge(&format!("n{a}"), &format!("n{b}"));
            }
            builder.build()
        })
    })
}

fn all_edges(graph: &NavGraph) -> BTreeSet<EdgeKey> {
    graph.edge_keys().cloned().collect()
}

proptest! {
    #[test]
    fn test_plan_is_deterministic(graph in graph_strategy(8)) {
        let first = plan_validation_sequence(&graph).unwrap();
        let second = plan_validation_sequence(&graph).unwrap();

        prop_assert_eq!(first.digest().unwrap(), second.digest().unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_plan_is_continuous_and_consistent(graph in graph_strategy(8)) {
        let seq = plan_validation_sequence(&graph).unwrap();

        prop_assert!(check_continuity(&seq.start_id, &seq.steps).is_ok());
        prop_assert!(!seq.has_invariant_violation(), "warnings: {:?}", seq.warnings);

        let numbers: Vec<usize> = seq.steps.iter().map(|t| t.step).collect();
        let expected: Vec<usize> = (1..=seq.steps.len()).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn test_plan_covers_every_reachable_edge(graph in graph_strategy(8)) {
        let seq = plan_validation_sequence(&graph).unwrap();
        let validated = seq.validated_edges();
        let edges = all_edges(&graph);

        // Each edge is validated at most once.
        prop_assert_eq!(validated.len(), seq.metrics.edge_validations);

        if seq.is_partial() {
            let unvisited: BTreeSet<EdgeKey> = seq.unvisited_edges.iter().cloned().collect();
            prop_assert!(validated.is_disjoint(&unvisited));
            let union: BTreeSet<EdgeKey> = validated.union(&unvisited).cloned().collect();
            prop_assert_eq!(union, edges);
        } else {
            prop_assert!(seq.unvisited_edges.is_empty());
            prop_assert_eq!(seq.metrics.edge_validations, graph.edge_count());
            prop_assert_eq!(validated, edges);
        }
    }

    #[test]
    fn test_shortest_path_matches_first_simple_path(
        graph in graph_strategy(7),
        from in 0..7usize,
        to in 0..7usize,
    ) {
        let from = format!("n{}", from % graph.node_count());
        let to = format!("n{}", to % graph.node_count());

        let simple = all_simple_paths(&graph, &from, &to, 1).unwrap();

        match find_path(&graph, &to, Some(&from)) {
            Ok(PathOutcome::Found(path)) => {
                prop_assert_eq!(simple.len(), 1);
                prop_assert_eq!(path.len(), simple[0].len());
                prop_assert_eq!(path.first().map(|t| t.from_id.clone()), Some(from));
                prop_assert_eq!(path.last().map(|t| t.to_id.clone()), Some(to));
            }
            Ok(PathOutcome::AlreadyAtTarget) => {
                prop_assert_eq!(&from, &to);
                prop_assert!(simple.is_empty());
            }
            Err(NavError::Unreachable(diag)) => {
                prop_assert!(simple.is_empty());
                prop_assert!(!diag.reachable_from_start.contains(&to));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

#[test]
fn test_single_node_graph_plans_nothing() {
    let graph = GraphBuilder::new().node("n0").build();

    let seq = plan_validation_sequence(&graph).unwrap();
    assert!(seq.steps.is_empty());
    assert!(!seq.is_partial());
}
