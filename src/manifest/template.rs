use super::JsonManifest;
use crate::template::{InMemoryTemplateCatalog, JobTemplate};
use serde::{Deserialize, Serialize};

/// Templates to seed an in-memory catalog with.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TemplateManifest {
    pub templates: Vec<JobTemplate>,
}

impl JsonManifest for TemplateManifest {}

impl TemplateManifest {
    pub fn into_catalog(self) -> InMemoryTemplateCatalog {
        let catalog = InMemoryTemplateCatalog::new();
        for template in self.templates {
            catalog.add(template);
        }
        catalog
    }
}
