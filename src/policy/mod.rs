//! Routing policy: which vertices and edges are off limits, and how edge
//! weights are adjusted.

use crate::error::PolicyConfigurationError;
use crate::flow::FlowConfig;
use crate::flow::keys::{DEFAULT_SERVICE_POLICY, SERVICE_POLICY_NAME_KEY};
use crate::graph::{EdgeIdentity, FlowEdge, FlowGraph};
use ahash::AHashSet;
use std::fmt;

mod builtin;
mod declarations;
mod registry;

pub use builtin::{OpenServicePolicy, StaticServicePolicy};
pub use declarations::{ConnectionRef, PolicyDeclarations, WeightOverride};
pub use registry::{PolicyFactory, PolicyRegistry};

/// Defines the contract a routing policy implements.
///
/// Policies are immutable once built; a reload replaces the whole instance.
pub trait ServicePolicy: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Names of nodes removed from the graph together with their edges.
    fn blocked_node_names(&self) -> AHashSet<String>;

    /// Edges of the fully assembled graph that must not be routed over.
    fn excluded_edges(&self, graph: &FlowGraph) -> AHashSet<EdgeIdentity>;

    /// A weight replacing the edge's advertised one, if the policy has one.
    fn adjusted_weight(&self, _edge: &FlowEdge) -> Option<f64> {
        None
    }
}

/// The immutable policy snapshot one compile runs against.
#[derive(Debug)]
pub struct RoutingPolicy {
    policy: Box<dyn ServicePolicy>,
    data_movement_path: Option<String>,
}

impl RoutingPolicy {
    pub fn new(policy: Box<dyn ServicePolicy>, data_movement_path: Option<String>) -> Self {
        Self {
            policy,
            data_movement_path,
        }
    }

    /// Reads the policy name and declarations from `config` and instantiates
    /// the policy through `registry`.
    pub fn from_config(
        registry: &PolicyRegistry,
        config: &FlowConfig,
    ) -> Result<Self, PolicyConfigurationError> {
        let name = config
            .get_non_blank(SERVICE_POLICY_NAME_KEY)
            .unwrap_or(DEFAULT_SERVICE_POLICY);
        let declarations = PolicyDeclarations::from_config(config)?;
        let policy = registry.create(name, &declarations)?;
        log::info!(
            "Routing policy '{}' loaded: {} blocked connections, {} blocked nodes, {} weight overrides",
            policy.name(),
            declarations.blocked_connections.len(),
            declarations.blocked_nodes.len(),
            declarations.weight_overrides.len()
        );
        Ok(Self::new(policy, declarations.data_movement_path))
    }

    pub fn name(&self) -> &str {
        self.policy.name()
    }

    pub fn policy(&self) -> &dyn ServicePolicy {
        self.policy.as_ref()
    }

    /// The administrator's default explicit path, used when a request has none.
    pub fn data_movement_path(&self) -> Option<&str> {
        self.data_movement_path.as_deref()
    }

    pub fn blocked_node_names(&self) -> AHashSet<String> {
        self.policy.blocked_node_names()
    }

    pub fn excluded_edges(&self, graph: &FlowGraph) -> AHashSet<EdgeIdentity> {
        self.policy.excluded_edges(graph)
    }

    pub fn adjusted_weight(&self, edge: &FlowEdge) -> Option<f64> {
        self.policy.adjusted_weight(edge)
    }
}
