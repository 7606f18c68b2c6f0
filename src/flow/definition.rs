use super::config::FlowConfig;
use super::keys::*;
use crate::error::CompileError;
use crate::graph::ServiceNode;
use serde::{Deserialize, Serialize};
use url::Url;

fn default_version() -> String {
    "1".to_string()
}

/// A logical request to move data from a source node to a sink node.
///
/// The source, sink, optional explicit path and preferred templates all live
/// in the flow's configuration, so they travel with it into every work unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSpec {
    uri: Url,
    #[serde(default)]
    config: FlowConfig,
    #[serde(default)]
    description: String,
    #[serde(default = "default_version")]
    version: String,
}

impl FlowSpec {
    pub fn new(uri: Url, config: FlowConfig) -> Self {
        Self {
            uri,
            config,
            description: String::new(),
            version: default_version(),
        }
    }

    /// Parses the flow URI, e.g. `flow://etl-group/daily-events`.
    pub fn parse(uri: &str, config: FlowConfig) -> Result<Self, CompileError> {
        let uri = Url::parse(uri).map_err(|e| CompileError::InvalidFlowUri {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(uri, config))
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.config.set(FLOW_SOURCE_IDENTIFIER_KEY, source);
        self
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.config.set(FLOW_DESTINATION_IDENTIFIER_KEY, destination);
        self
    }

    pub fn with_explicit_path(mut self, path: &str) -> Self {
        self.config.set(FLOW_DATA_MOVEMENT_PATH_KEY, path);
        self
    }

    pub fn with_template_uris(mut self, uris: &[&str]) -> Self {
        self.config.set(FLOW_TEMPLATE_URIS_KEY, uris.join(","));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn source_identifier(&self) -> Result<ServiceNode, CompileError> {
        self.required_node(FLOW_SOURCE_IDENTIFIER_KEY)
    }

    pub fn destination_identifier(&self) -> Result<ServiceNode, CompileError> {
        self.required_node(FLOW_DESTINATION_IDENTIFIER_KEY)
    }

    /// The request's own explicit hop path, if one was given and is not blank.
    pub fn explicit_path(&self) -> Option<&str> {
        self.config.get_non_blank(FLOW_DATA_MOVEMENT_PATH_KEY)
    }

    pub fn template_uris(&self) -> Vec<String> {
        self.config.get_list(FLOW_TEMPLATE_URIS_KEY)
    }

    fn required_node(&self, key: &str) -> Result<ServiceNode, CompileError> {
        self.config
            .get_non_blank(key)
            .map(ServiceNode::new)
            .ok_or_else(|| CompileError::MissingFlowConfig {
                flow: self.uri.to_string(),
                key: key.to_string(),
            })
    }
}
