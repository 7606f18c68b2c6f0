use super::JsonManifest;
use crate::error::ConversionError;
use crate::flow::{FlowConfig, FlowSpec, IntoFlowSpec};
use serde::{Deserialize, Serialize};

/// A flow request as written by users.
///
/// ```json
/// { "uri": "flow://etl/daily-events", "source": "A", "destination": "D",
///   "explicit_path": "A,B,D", "config": { "job.retries": "3" } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlowManifest {
    pub uri: String,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub explicit_path: Option<String>,
    #[serde(default)]
    pub template_uris: Vec<String>,
    #[serde(default)]
    pub config: FlowConfig,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl JsonManifest for FlowManifest {}

impl IntoFlowSpec for FlowManifest {
    fn into_flow_spec(self) -> Result<FlowSpec, ConversionError> {
        if self.source.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(ConversionError::ValidationError(
                "flow source and destination must not be blank".to_string(),
            ));
        }

        let mut spec = FlowSpec::parse(&self.uri, self.config)
            .map_err(|e| ConversionError::ValidationError(e.to_string()))?
            .with_source(self.source.trim())
            .with_destination(self.destination.trim())
            .with_description(self.description);
        if let Some(path) = &self.explicit_path {
            spec = spec.with_explicit_path(path);
        }
        if !self.template_uris.is_empty() {
            let uris: Vec<&str> = self.template_uris.iter().map(String::as_str).collect();
            spec = spec.with_template_uris(&uris);
        }
        if let Some(version) = self.version {
            spec = spec.with_version(version);
        }
        Ok(spec)
    }
}
