use crate::error::PolicyConfigurationError;
use crate::flow::FlowConfig;
use crate::flow::keys::*;
use crate::graph::{EdgeIdentity, ServiceNode};
use crate::topology::ExecutionEngine;

/// A `(source, sink, engine)` triple naming one capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionRef {
    pub source: ServiceNode,
    pub target: ServiceNode,
    pub engine: ExecutionEngine,
}

impl ConnectionRef {
    /// Parses `source:sink:engineUri`. Only the first two colons separate
    /// fields; the engine URI keeps its own.
    pub fn parse(entry: &str) -> Result<Self, String> {
        let mut parts = entry.trim().splitn(3, ':');
        let (Some(source), Some(target), Some(engine)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err("expected 'source:sink:engineUri'".to_string());
        };
        let (source, target, engine) = (source.trim(), target.trim(), engine.trim());
        if source.is_empty() || target.is_empty() || engine.is_empty() {
            return Err("source, sink and engine URI must all be non-empty".to_string());
        }
        let engine = ExecutionEngine::parse(engine).map_err(|e| e.to_string())?;
        Ok(Self {
            source: ServiceNode::new(source),
            target: ServiceNode::new(target),
            engine,
        })
    }

    pub fn identity(&self) -> EdgeIdentity {
        EdgeIdentity::new(&self.source, &self.target, &self.engine)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightOverride {
    pub connection: ConnectionRef,
    pub weight: f64,
}

impl WeightOverride {
    /// Parses `source:sink:engineUri=weight`.
    pub fn parse(entry: &str) -> Result<Self, String> {
        let (connection, weight) = entry
            .rsplit_once('=')
            .ok_or_else(|| "expected 'source:sink:engineUri=weight'".to_string())?;
        let weight: f64 = weight
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number", weight.trim()))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(format!("weight {} must be finite and non-negative", weight));
        }
        Ok(Self {
            connection: ConnectionRef::parse(connection)?,
            weight,
        })
    }
}

/// Administrator declarations a routing policy is instantiated from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDeclarations {
    pub blocked_connections: Vec<ConnectionRef>,
    pub blocked_nodes: Vec<ServiceNode>,
    pub weight_overrides: Vec<WeightOverride>,
    pub data_movement_path: Option<String>,
}

impl PolicyDeclarations {
    pub fn from_config(config: &FlowConfig) -> Result<Self, PolicyConfigurationError> {
        let blocked_connections = config
            .get_list(POLICY_BLOCKED_CONNECTIONS_KEY)
            .iter()
            .map(|entry| {
                ConnectionRef::parse(entry).map_err(|reason| {
                    PolicyConfigurationError::MalformedBlockedConnection {
                        entry: entry.clone(),
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let blocked_nodes = config
            .get_list(POLICY_BLOCKED_NODES_KEY)
            .into_iter()
            .map(|name| {
                // Policy entries use `:` as their field separator.
                if name.contains(':') {
                    Err(PolicyConfigurationError::MalformedBlockedNode(name))
                } else {
                    Ok(ServiceNode::new(name))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let weight_overrides = config
            .get_list(POLICY_EDGE_WEIGHTS_KEY)
            .iter()
            .map(|entry| {
                WeightOverride::parse(entry).map_err(|reason| {
                    PolicyConfigurationError::MalformedEdgeWeight {
                        entry: entry.clone(),
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data_movement_path = config
            .get_non_blank(POLICY_DATA_MOVEMENT_PATH_KEY)
            .map(str::to_string);

        Ok(Self {
            blocked_connections,
            blocked_nodes,
            weight_overrides,
            data_movement_path,
        })
    }
}
