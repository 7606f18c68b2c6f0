//! Tests for the multigraph model and path selection over hand-built graphs.
mod common;
use common::*;
use multihop::prelude::*;

fn edge(source: &str, target: &str, engine_uri: &str, weight: f64) -> FlowEdge {
    FlowEdge::new(
        ServiceNode::new(source),
        ServiceNode::new(target),
        FlowEdgeProps::new().with_weight(weight),
        engine(engine_uri),
    )
    .expect("test edge must be valid")
}

fn diamond_graph() -> FlowGraph {
    let mut graph = FlowGraph::new();
    graph.add_edge(edge("A", "B", EAST_ENGINE, 5.0));
    graph.add_edge(edge("B", "D", EAST_ENGINE, 5.0));
    graph.add_edge(edge("A", "C", EAST_ENGINE, 1.0));
    graph.add_edge(edge("C", "D", EAST_ENGINE, 1.0));
    graph
}

#[test]
fn test_add_node_is_idempotent() {
    let mut graph = FlowGraph::new();
    let first = graph.add_node(ServiceNode::new("A"));
    let second = graph.add_node(ServiceNode::new("A"));
    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_duplicate_edge_identity_is_suppressed() {
    let mut graph = FlowGraph::new();
    assert!(graph.add_edge(edge("A", "B", EAST_ENGINE, 1.0)));
    assert!(!graph.add_edge(edge("A", "B", EAST_ENGINE, 9.0)));
    assert_eq!(graph.edge_count(), 1);

    // The first edge is kept, not merged with the second.
    let kept = graph.edge(&identity("A", "B", EAST_ENGINE)).unwrap();
    assert_eq!(kept.weight(), 1.0);
}

#[test]
fn test_parallel_edges_on_different_engines() {
    let mut graph = FlowGraph::new();
    assert!(graph.add_edge(edge("A", "B", EAST_ENGINE, 1.0)));
    assert!(graph.add_edge(edge("A", "B", WEST_ENGINE, 2.0)));

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges_between(&"A".into(), &"B".into()).len(), 2);
    assert!(graph.has_edge_between(&"A".into(), &"B".into()));
    assert!(!graph.has_edge_between(&"B".into(), &"A".into()));
}

#[test]
fn test_identities_with_separator_in_names_do_not_collide() {
    let mut graph = FlowGraph::new();
    assert!(graph.add_edge(edge("a:b", "c", EAST_ENGINE, 1.0)));
    assert!(graph.add_edge(edge("a", "b:c", EAST_ENGINE, 2.0)));
    assert_eq!(graph.edge_count(), 2);

    let first = identity("a:b", "c", EAST_ENGINE);
    let second = identity("a", "b:c", EAST_ENGINE);
    assert_ne!(first, second);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(graph.edge(&second).unwrap().weight(), 2.0);
}

#[test]
fn test_remove_node_drops_incident_edges() {
    let mut graph = diamond_graph();
    assert!(graph.remove_node(&ServiceNode::new("C")));
    assert!(!graph.remove_node(&ServiceNode::new("C")));

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(!graph.contains_edge(&identity("A", "C", EAST_ENGINE)));
    assert!(!graph.contains_edge(&identity("C", "D", EAST_ENGINE)));

    // The same capability can be added again once its node is back.
    assert!(graph.add_edge(edge("A", "C", EAST_ENGINE, 1.0)));
}

#[test]
fn test_remove_edge() {
    let mut graph = diamond_graph();
    let removed = graph.remove_edge(&identity("A", "B", EAST_ENGINE));
    assert!(removed.is_some());
    assert!(graph.remove_edge(&identity("A", "B", EAST_ENGINE)).is_none());
    assert_eq!(graph.outgoing(&"A".into()).len(), 1);
}

#[test]
fn test_set_edge_weight_in_place() {
    let mut graph = diamond_graph();
    let ac = identity("A", "C", EAST_ENGINE);

    assert!(graph.set_edge_weight(&ac, 50.0).unwrap());
    assert_eq!(graph.edge(&ac).unwrap().weight(), 50.0);
    assert!(
        !graph
            .set_edge_weight(&identity("X", "Y", EAST_ENGINE), 1.0)
            .unwrap()
    );
    assert!(graph.set_edge_weight(&ac, f64::INFINITY).is_err());
    assert!(graph.set_edge_weight(&ac, -0.5).is_err());
    assert_eq!(graph.edge(&ac).unwrap().weight(), 50.0);

    let edges = PathSelector::new(&graph)
        .shortest_path(&"A".into(), &"D".into())
        .unwrap();
    let route: Vec<&str> = edges.iter().map(|e| e.target().node_name()).collect();
    assert_eq!(route, vec!["B", "D"]);
}

#[test]
fn test_edge_without_weight_uses_default() {
    let edge = FlowEdge::new(
        "A".into(),
        "B".into(),
        FlowEdgeProps::new(),
        engine(EAST_ENGINE),
    )
    .unwrap();
    assert_eq!(edge.weight(), multihop::graph::DEFAULT_EDGE_WEIGHT);
    assert_eq!(edge.identity().to_string(), "A:B:azkaban://east:8443");
}

#[test]
fn test_edge_equality_is_by_identity() {
    let cheap = edge("A", "B", EAST_ENGINE, 1.0);
    let expensive = edge("A", "B", EAST_ENGINE, 100.0);
    let other_engine = edge("A", "B", WEST_ENGINE, 1.0);
    assert_eq!(cheap, expensive);
    assert_ne!(cheap, other_engine);
}

#[test]
fn test_zero_weight_edges_are_allowed() {
    let mut graph = FlowGraph::new();
    graph.add_edge(edge("A", "B", EAST_ENGINE, 0.0));
    graph.add_edge(edge("B", "C", EAST_ENGINE, 0.0));
    graph.add_edge(edge("A", "C", EAST_ENGINE, 1.0));

    let edges = PathSelector::new(&graph)
        .shortest_path(&"A".into(), &"C".into())
        .unwrap();
    assert_eq!(edges.len(), 2);
}

#[test]
fn test_verify_explicit_path_rejects_short_paths() {
    let graph = diamond_graph();
    let selector = PathSelector::new(&graph);
    let result = selector.verify_explicit_path("A", &"A".into(), &"D".into());
    assert!(matches!(
        result,
        Err(CompileError::InvalidExplicitPath { .. })
    ));
}

#[test]
fn test_verify_explicit_path_reports_missing_hop() {
    let graph = diamond_graph();
    let selector = PathSelector::new(&graph);
    match selector.verify_explicit_path("A,B,C,D", &"A".into(), &"D".into()) {
        Err(CompileError::InvalidExplicitPath { path, reason }) => {
            assert_eq!(path, "A,B,C,D");
            assert!(reason.contains("'B' to 'C'"));
        }
        other => panic!("Expected InvalidExplicitPath, got {:?}", other),
    }
}

#[test]
fn test_dot_output_lists_nodes() {
    let dot = diamond_graph().to_dot();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("azkaban://east:8443"));
}
