//! Job templates and the catalog they are resolved against.

use crate::error::CatalogError;
use crate::flow::FlowConfig;
use crate::graph::{EdgeIdentity, FlowGraph};
use ahash::AHashMap;
use itertools::Itertools;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reusable job definition a work unit can be bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    uri: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    config: FlowConfig,
    #[serde(default)]
    required_keys: Vec<String>,
}

impl JobTemplate {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            description: String::new(),
            config: FlowConfig::default(),
            required_keys: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_required_key(mut self, key: impl Into<String>) -> Self {
        self.required_keys.push(key.into());
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    /// Overlays `job_config` on the template's configuration and checks that
    /// every required key ends up present.
    pub fn resolve(&self, job_config: &FlowConfig) -> Result<FlowConfig, String> {
        let resolved = job_config.with_fallback(&self.config);
        let missing: Vec<&str> = self
            .required_keys
            .iter()
            .map(String::as_str)
            .filter(|key| !resolved.contains(key))
            .collect();
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(format!("missing required keys [{}]", missing.join(", ")))
        }
    }
}

/// Looks templates up by URI.
pub trait TemplateCatalog: Send + Sync {
    fn get_template(&self, uri: &str) -> Result<JobTemplate, CatalogError>;

    fn all_templates(&self) -> Vec<JobTemplate>;
}

#[derive(Debug, Default)]
pub struct InMemoryTemplateCatalog {
    templates: RwLock<BTreeMap<String, JobTemplate>>,
}

impl InMemoryTemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(self, template: JobTemplate) -> Self {
        self.add(template);
        self
    }

    pub fn add(&self, template: JobTemplate) -> Option<JobTemplate> {
        self.templates
            .write()
            .insert(template.uri().to_string(), template)
    }

    pub fn remove(&self, uri: &str) -> Option<JobTemplate> {
        self.templates.write().remove(uri)
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn get_template(&self, uri: &str) -> Result<JobTemplate, CatalogError> {
        self.templates
            .read()
            .get(uri)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(uri.to_string()))
    }

    fn all_templates(&self) -> Vec<JobTemplate> {
        self.templates.read().values().cloned().collect()
    }
}

/// How candidate templates are advertised for each edge.
#[derive(Debug, Clone, Default)]
pub enum EdgeTemplates {
    /// Every template in the catalog is a candidate for every edge.
    #[default]
    AllCatalogTemplates,
    /// Candidates supplied per edge identity; edges not listed have none.
    Mapped(AHashMap<EdgeIdentity, Vec<String>>),
}

impl EdgeTemplates {
    /// Computes the candidate list of every edge in `graph` for one compile.
    pub fn populate(
        &self,
        graph: &FlowGraph,
        catalog: Option<&dyn TemplateCatalog>,
    ) -> EdgeTemplateMap {
        let mut candidates = AHashMap::new();
        match self {
            EdgeTemplates::AllCatalogTemplates => {
                let Some(catalog) = catalog else {
                    return EdgeTemplateMap { candidates };
                };
                let uris: Vec<String> = catalog
                    .all_templates()
                    .iter()
                    .map(|t| t.uri().to_string())
                    .collect();
                if uris.is_empty() {
                    return EdgeTemplateMap { candidates };
                }
                for edge in graph.edges() {
                    candidates.insert(edge.identity().clone(), uris.clone());
                }
            }
            EdgeTemplates::Mapped(map) => {
                for edge in graph.edges() {
                    if let Some(uris) = map.get(edge.identity()) {
                        candidates.insert(
                            edge.identity().clone(),
                            uris.iter().unique().cloned().collect(),
                        );
                    }
                }
            }
        }
        EdgeTemplateMap { candidates }
    }
}

/// Per-compile lookup from edge identity to its advertised template URIs.
#[derive(Debug, Clone, Default)]
pub struct EdgeTemplateMap {
    candidates: AHashMap<EdgeIdentity, Vec<String>>,
}

impl EdgeTemplateMap {
    pub fn candidates(&self, identity: &EdgeIdentity) -> &[String] {
        self.candidates
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
