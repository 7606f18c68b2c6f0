//! JSON file formats the tools load topologies, flows, templates and compiler
//! configuration from.

use crate::error::ManifestError;
use crate::flow::FlowConfig;
use serde::de::DeserializeOwned;
use std::fs;

mod flow;
mod template;
mod topology;

pub use flow::FlowManifest;
pub use template::TemplateManifest;
pub use topology::{CapabilityEntry, TopologyEntry, TopologyManifest};

/// Loading helpers shared by every manifest type.
pub trait JsonManifest: DeserializeOwned {
    fn from_json(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

/// Compiler configuration is a flat JSON object of string properties.
impl JsonManifest for FlowConfig {}
