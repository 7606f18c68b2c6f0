use super::{PolicyDeclarations, ServicePolicy};
use crate::graph::{EdgeIdentity, FlowEdge, FlowGraph};
use ahash::{AHashMap, AHashSet};

/// Excludes declared connections and every edge touching a blocked node, and
/// applies declared weight overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticServicePolicy {
    blocked_edges: AHashSet<EdgeIdentity>,
    blocked_nodes: AHashSet<String>,
    weights: AHashMap<EdgeIdentity, f64>,
}

impl StaticServicePolicy {
    pub fn from_declarations(declarations: &PolicyDeclarations) -> Box<dyn ServicePolicy> {
        Box::new(Self {
            blocked_edges: declarations
                .blocked_connections
                .iter()
                .map(|c| c.identity())
                .collect(),
            blocked_nodes: declarations
                .blocked_nodes
                .iter()
                .map(|n| n.node_name().to_string())
                .collect(),
            weights: declarations
                .weight_overrides
                .iter()
                .map(|w| (w.connection.identity(), w.weight))
                .collect(),
        })
    }
}

impl ServicePolicy for StaticServicePolicy {
    fn name(&self) -> &str {
        "static"
    }

    fn blocked_node_names(&self) -> AHashSet<String> {
        self.blocked_nodes.clone()
    }

    fn excluded_edges(&self, graph: &FlowGraph) -> AHashSet<EdgeIdentity> {
        graph
            .edges()
            .filter(|edge| {
                self.blocked_edges.contains(edge.identity())
                    || self.blocked_nodes.contains(edge.source().node_name())
                    || self.blocked_nodes.contains(edge.target().node_name())
            })
            .map(|edge| edge.identity().clone())
            .collect()
    }

    fn adjusted_weight(&self, edge: &FlowEdge) -> Option<f64> {
        self.weights.get(edge.identity()).copied()
    }
}

/// Routes over the full topology, ignoring every declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenServicePolicy;

impl OpenServicePolicy {
    pub fn from_declarations(_declarations: &PolicyDeclarations) -> Box<dyn ServicePolicy> {
        Box::new(Self)
    }
}

impl ServicePolicy for OpenServicePolicy {
    fn name(&self) -> &str {
        "open"
    }

    fn blocked_node_names(&self) -> AHashSet<String> {
        AHashSet::new()
    }

    fn excluded_edges(&self, _graph: &FlowGraph) -> AHashSet<EdgeIdentity> {
        AHashSet::new()
    }
}
