use super::JsonManifest;
use crate::error::ManifestError;
use crate::graph::FlowEdgeProps;
use crate::topology::{Capability, ExecutionEngine, InMemorySpecExecutor, TopologySpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of engines and the node pairs each of them advertises.
///
/// ```json
/// { "topologies": [
///     { "uri": "topology/east", "engine": "azkaban://east:8443",
///       "capabilities": [ { "source": "A", "target": "B", "weight": 5.0 } ] } ] }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TopologyManifest {
    pub topologies: Vec<TopologyEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TopologyEntry {
    pub uri: String,
    #[serde(default)]
    pub description: String,
    pub engine: String,
    #[serde(default)]
    pub capabilities: Vec<CapabilityEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CapabilityEntry {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl JsonManifest for TopologyManifest {}

impl TopologyManifest {
    /// Builds one in-memory topology per entry, in manifest order.
    pub fn into_topology_specs(self) -> Result<Vec<TopologySpec>, ManifestError> {
        self.topologies
            .into_iter()
            .map(|entry| {
                let engine = ExecutionEngine::parse(&entry.engine)
                    .map_err(|e| ManifestError::Invalid(format!("topology '{}': {}", entry.uri, e)))?;
                let capabilities = entry
                    .capabilities
                    .into_iter()
                    .map(|c| {
                        let mut props = FlowEdgeProps::from(c.properties);
                        if let Some(weight) = c.weight {
                            props = props.with_weight(weight);
                        }
                        Capability::new(c.source, c.target).with_props(props)
                    })
                    .collect();
                let executor = InMemorySpecExecutor::new(engine, capabilities);
                Ok(TopologySpec::new(entry.uri, Arc::new(executor)).with_description(entry.description))
            })
            .collect()
    }
}
