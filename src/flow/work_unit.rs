use super::config::FlowConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// One hop's executable artifact, analogous to a scheduled job definition.
///
/// A work unit is *resolved* when it was bound to a catalog template and its
/// configuration merged with the template's; otherwise it only carries the
/// flow's own configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    uri: Url,
    config: FlowConfig,
    description: String,
    version: String,
    template_uri: Option<String>,
}

impl JobSpec {
    pub fn builder(uri: Url) -> JobSpecBuilder {
        JobSpecBuilder::new(uri)
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

    pub fn template_uri(&self) -> Option<&str> {
        self.template_uri.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.template_uri.is_some()
    }
}

pub struct JobSpecBuilder {
    uri: Url,
    config: FlowConfig,
    description: String,
    version: String,
    template_uri: Option<String>,
}

impl JobSpecBuilder {
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            config: FlowConfig::default(),
            description: String::new(),
            version: "1".to_string(),
            template_uri: None,
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
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

    pub fn with_template(mut self, template_uri: impl Into<String>) -> Self {
        self.template_uri = Some(template_uri.into());
        self
    }

    pub fn build(self) -> JobSpec {
        JobSpec {
            uri: self.uri,
            config: self.config,
            description: self.description,
            version: self.version,
            template_uri: self.template_uri,
        }
    }
}
