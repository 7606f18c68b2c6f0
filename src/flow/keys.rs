//! Configuration keys understood by the compiler.

/// Logical source node of a flow request.
pub const FLOW_SOURCE_IDENTIFIER_KEY: &str = "flow.sourceIdentifier";
/// Logical sink node of a flow request.
pub const FLOW_DESTINATION_IDENTIFIER_KEY: &str = "flow.destinationIdentifier";
/// Per-request explicit hop path, e.g. `A,B,C`. Takes precedence over the policy path.
pub const FLOW_DATA_MOVEMENT_PATH_KEY: &str = "flow.dataMovementPath";
/// Comma list of template URIs the flow would like its work units bound to.
pub const FLOW_TEMPLATE_URIS_KEY: &str = "flow.templateUris";

/// Identifier of the routing policy to instantiate from the policy registry.
pub const SERVICE_POLICY_NAME_KEY: &str = "service.policy.name";
/// Comma list of `source:sink:engineUri` triples that must never be routed over.
pub const POLICY_BLOCKED_CONNECTIONS_KEY: &str = "service.policy.blockedConnections";
/// Comma list of node names removed from the graph with all their edges.
pub const POLICY_BLOCKED_NODES_KEY: &str = "service.policy.blockedNodes";
/// Comma list of `source:sink:engineUri=weight` overrides.
pub const POLICY_EDGE_WEIGHTS_KEY: &str = "service.policy.edgeWeights";
/// Default explicit hop path applied to every request that carries none.
pub const POLICY_DATA_MOVEMENT_PATH_KEY: &str = "service.policy.dataMovementPath";
/// Timeout for a single topology capability query, in milliseconds.
pub const TOPOLOGY_QUERY_TIMEOUT_MS_KEY: &str = "service.topology.queryTimeoutMs";

/// Edge property carrying the static routing weight of a capability.
pub const EDGE_WEIGHT_KEY: &str = "flow.edge.weight";

pub const DEFAULT_SERVICE_POLICY: &str = "static";
pub const DEFAULT_TOPOLOGY_QUERY_TIMEOUT_MS: u64 = 30_000;
