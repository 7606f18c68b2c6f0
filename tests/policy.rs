//! Tests for policy declaration parsing and the policy registry.
mod common;
use common::*;
use multihop::flow::keys::*;
use multihop::policy::{ConnectionRef, OpenServicePolicy, WeightOverride};
use multihop::prelude::*;

#[test]
fn test_connection_ref_keeps_engine_uri_colons() {
    let connection = ConnectionRef::parse("A:B:azkaban://east:8443").unwrap();
    assert_eq!(connection.source.node_name(), "A");
    assert_eq!(connection.target.node_name(), "B");
    assert_eq!(connection.engine.to_string(), "azkaban://east:8443");
    assert_eq!(connection.identity(), identity("A", "B", EAST_ENGINE));
}

#[test]
fn test_connection_ref_rejects_missing_fields() {
    assert!(ConnectionRef::parse("A:B").is_err());
    assert!(ConnectionRef::parse("A::azkaban://east").is_err());
    assert!(ConnectionRef::parse("A:B:not a uri").is_err());
}

#[test]
fn test_weight_override_parsing() {
    let parsed = WeightOverride::parse("A:B:azkaban://east:8443=2.5").unwrap();
    assert_eq!(parsed.weight, 2.5);
    assert_eq!(parsed.connection.identity(), identity("A", "B", EAST_ENGINE));

    assert!(WeightOverride::parse("A:B:azkaban://east:8443").is_err());
    assert!(WeightOverride::parse("A:B:azkaban://east:8443=heavy").is_err());
    assert!(WeightOverride::parse("A:B:azkaban://east:8443=-1").is_err());
}

#[test]
fn test_declarations_from_config() {
    let config = FlowConfig::new()
        .with(
            POLICY_BLOCKED_CONNECTIONS_KEY,
            format!("A:B:{}, C:D:{}", EAST_ENGINE, WEST_ENGINE),
        )
        .with(POLICY_BLOCKED_NODES_KEY, " X ,Y,")
        .with(POLICY_EDGE_WEIGHTS_KEY, format!("A:C:{}=4", EAST_ENGINE))
        .with(POLICY_DATA_MOVEMENT_PATH_KEY, "A,C,D");

    let declarations = PolicyDeclarations::from_config(&config).unwrap();
    assert_eq!(declarations.blocked_connections.len(), 2);
    assert_eq!(
        declarations.blocked_connections[1].identity(),
        identity("C", "D", WEST_ENGINE)
    );
    let nodes: Vec<&str> = declarations
        .blocked_nodes
        .iter()
        .map(|n| n.node_name())
        .collect();
    assert_eq!(nodes, vec!["X", "Y"]);
    assert_eq!(declarations.weight_overrides[0].weight, 4.0);
    assert_eq!(declarations.data_movement_path.as_deref(), Some("A,C,D"));
}

#[test]
fn test_empty_config_yields_no_declarations() {
    let declarations = PolicyDeclarations::from_config(&FlowConfig::new()).unwrap();
    assert_eq!(declarations, PolicyDeclarations::default());

    let blank = FlowConfig::new().with(POLICY_DATA_MOVEMENT_PATH_KEY, "   ");
    let declarations = PolicyDeclarations::from_config(&blank).unwrap();
    assert!(declarations.data_movement_path.is_none());
}

#[test]
fn test_malformed_declarations_fail_at_build() {
    let bad_connection = FlowConfig::new().with(POLICY_BLOCKED_CONNECTIONS_KEY, "A-B");
    assert!(matches!(
        Compiler::builder(bad_connection).build(),
        Err(PolicyConfigurationError::MalformedBlockedConnection { .. })
    ));

    let bad_node = FlowConfig::new().with(POLICY_BLOCKED_NODES_KEY, "A:B");
    assert!(matches!(
        Compiler::builder(bad_node).build(),
        Err(PolicyConfigurationError::MalformedBlockedNode(_))
    ));

    let bad_weight = FlowConfig::new().with(POLICY_EDGE_WEIGHTS_KEY, "A:B:azkaban://east=x");
    assert!(matches!(
        Compiler::builder(bad_weight).build(),
        Err(PolicyConfigurationError::MalformedEdgeWeight { .. })
    ));
}

#[test]
fn test_unknown_policy_fails_at_build() {
    let config = FlowConfig::new().with(SERVICE_POLICY_NAME_KEY, "weighted-random");
    match Compiler::builder(config).build() {
        Err(PolicyConfigurationError::UnknownPolicy(name)) => assert_eq!(name, "weighted-random"),
        Err(e) => panic!("Expected UnknownPolicy, got {:?}", e),
        Ok(_) => panic!("Expected UnknownPolicy, got a compiler"),
    }
}

#[test]
fn test_registry_defaults() {
    let registry = PolicyRegistry::new();
    assert_eq!(registry.names(), vec!["open", "static"]);
    assert!(registry.contains("static"));
    assert!(!PolicyRegistry::empty().contains("static"));

    let policy = registry
        .create("static", &PolicyDeclarations::default())
        .unwrap();
    assert_eq!(policy.name(), "static");
}

#[test]
fn test_registry_alias_selects_builtin() {
    let registry = PolicyRegistry::new().with_alias("legacy", "static");
    let policy = registry
        .create("legacy", &PolicyDeclarations::default())
        .unwrap();
    assert_eq!(policy.name(), "static");

    // Aliasing an unknown built-in registers nothing.
    let registry = PolicyRegistry::new().with_alias("ghost", "does-not-exist");
    assert!(!registry.contains("ghost"));
}

#[test]
fn test_default_policy_is_static() {
    let compiler = diamond_compiler(FlowConfig::new());
    assert_eq!(compiler.policy().name(), DEFAULT_SERVICE_POLICY);
}

#[test]
fn test_static_policy_excludes_edges_touching_blocked_nodes() {
    let config = FlowConfig::new()
        .with(POLICY_BLOCKED_NODES_KEY, "B")
        .with(POLICY_BLOCKED_CONNECTIONS_KEY, format!("A:C:{}", EAST_ENGINE));
    let policy = RoutingPolicy::from_config(&PolicyRegistry::new(), &config).unwrap();

    let mut graph = FlowGraph::new();
    for (source, target) in [("A", "B"), ("B", "D"), ("A", "C"), ("C", "D")] {
        graph.add_edge(
            FlowEdge::new(
                source.into(),
                target.into(),
                FlowEdgeProps::new(),
                engine(EAST_ENGINE),
            )
            .unwrap(),
        );
    }

    let excluded = policy.excluded_edges(&graph);
    assert_eq!(excluded.len(), 3);
    assert!(excluded.contains(&identity("A", "B", EAST_ENGINE)));
    assert!(excluded.contains(&identity("B", "D", EAST_ENGINE)));
    assert!(excluded.contains(&identity("A", "C", EAST_ENGINE)));
    assert!(policy.blocked_node_names().contains("B"));
}

/// Avoids one node by name, ignoring all declarations.
#[derive(Debug)]
struct AvoidBPolicy;

impl AvoidBPolicy {
    fn from_declarations(_declarations: &PolicyDeclarations) -> Box<dyn ServicePolicy> {
        Box::new(Self)
    }
}

impl ServicePolicy for AvoidBPolicy {
    fn name(&self) -> &str {
        "avoid-b"
    }

    fn blocked_node_names(&self) -> ahash::AHashSet<String> {
        ["B".to_string()].into_iter().collect()
    }

    fn excluded_edges(&self, _graph: &FlowGraph) -> ahash::AHashSet<EdgeIdentity> {
        ahash::AHashSet::new()
    }
}

#[tokio::test]
async fn test_custom_policy_is_selectable_by_name() {
    let config = FlowConfig::new()
        .with(SERVICE_POLICY_NAME_KEY, "avoid-b")
        .with(POLICY_EDGE_WEIGHTS_KEY, format!("A:C:{}=100", EAST_ENGINE));
    let compiler = Compiler::builder(config)
        .with_policy("avoid-b", AvoidBPolicy::from_declarations)
        .with_topology(diamond_topology())
        .build()
        .unwrap();

    // The custom policy ignores the weight override, so A -> C stays cheap.
    let plan = compiler.compile(&a_to_d_flow()).await.unwrap();
    assert_eq!(plan.route(), vec!["A", "C", "D"]);
    assert!(!compiler.last_graph().unwrap().contains_node(&"B".into()));
}

#[tokio::test]
async fn test_policy_alias_on_builder() {
    let config = FlowConfig::new()
        .with(SERVICE_POLICY_NAME_KEY, "passthrough")
        .with(POLICY_BLOCKED_NODES_KEY, "C");
    let compiler = Compiler::builder(config)
        .with_policy_alias("passthrough", "open")
        .with_topology(diamond_topology())
        .build()
        .unwrap();

    let plan = compiler.compile(&a_to_d_flow()).await.unwrap();
    assert_eq!(plan.route(), vec!["A", "C", "D"]);
}

#[test]
fn test_open_policy_excludes_nothing() {
    let policy = OpenServicePolicy::from_declarations(&PolicyDeclarations::default());
    assert_eq!(policy.name(), "open");
    assert!(policy.excluded_edges(&FlowGraph::new()).is_empty());
    assert!(policy.adjusted_weight(
        &FlowEdge::new("A".into(), "B".into(), FlowEdgeProps::new(), engine(EAST_ENGINE)).unwrap()
    )
    .is_none());
}
