use crate::error::CompileError;
use crate::flow::{FlowSpec, JobSpec};
use crate::graph::{FlowEdge, ServiceNode};
use crate::template::{EdgeTemplateMap, TemplateCatalog};
use url::Url;

/// The outcome of materializing one hop.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized {
    /// Bound to a catalog template, configuration fully resolved.
    Resolved(JobSpec),
    /// No applicable template; carries only the flow's own configuration.
    Unresolved(JobSpec),
}

impl Materialized {
    pub fn job_spec(&self) -> &JobSpec {
        match self {
            Materialized::Resolved(spec) | Materialized::Unresolved(spec) => spec,
        }
    }

    pub fn into_job_spec(self) -> JobSpec {
        match self {
            Materialized::Resolved(spec) | Materialized::Unresolved(spec) => spec,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Materialized::Resolved(_))
    }
}

/// The identity of the work unit for hop `source -> target` of a flow:
/// `<flow-scheme>://<flow-authority>/<source>-<target>`.
///
/// Depends only on its inputs, so recompiling a flow over the same path
/// yields the same URIs.
pub fn work_unit_uri(
    flow_uri: &Url,
    source: &ServiceNode,
    target: &ServiceNode,
) -> Result<Url, CompileError> {
    let invalid = |message: String| CompileError::InvalidFlowUri {
        uri: flow_uri.to_string(),
        message,
    };
    let mut uri = Url::parse(&format!("{}://{}", flow_uri.scheme(), flow_uri.authority()))
        .map_err(|e| invalid(e.to_string()))?;
    uri.set_path(&format!("/{}-{}", source.node_name(), target.node_name()));
    Ok(uri)
}

/// Turns each selected hop into a work unit, resolving templates where the
/// hop's edge advertises one.
pub struct WorkUnitFactory<'a> {
    catalog: Option<&'a dyn TemplateCatalog>,
    templates: &'a EdgeTemplateMap,
}

impl<'a> WorkUnitFactory<'a> {
    pub fn new(catalog: Option<&'a dyn TemplateCatalog>, templates: &'a EdgeTemplateMap) -> Self {
        Self { catalog, templates }
    }

    /// Materializes the hop `source -> target` carried by `edge`.
    ///
    /// A template the flow prefers wins if the edge advertises it; otherwise
    /// the edge's first advertised template is used. An advertised template
    /// missing from the catalog, or advertised with no catalog configured, is
    /// an error.
    pub fn materialize(
        &self,
        source: &ServiceNode,
        target: &ServiceNode,
        edge: &FlowEdge,
        flow: &FlowSpec,
    ) -> Result<Materialized, CompileError> {
        let uri = work_unit_uri(flow.uri(), source, target)?;
        let builder = JobSpec::builder(uri)
            .with_config(flow.config().clone())
            .with_description(flow.description())
            .with_version(flow.version());

        let candidates = self.templates.candidates(edge.identity());
        let chosen = flow
            .template_uris()
            .into_iter()
            .find(|uri| candidates.contains(uri))
            .or_else(|| candidates.first().cloned());

        let Some(template_uri) = chosen else {
            let spec = builder.build();
            log::info!(
                "Unresolved work unit '{}' with {} properties",
                spec.uri(),
                spec.config().len()
            );
            return Ok(Materialized::Unresolved(spec));
        };

        let unresolvable = |reason: String| CompileError::TemplateResolution {
            template_uri: template_uri.clone(),
            hop: format!("{}-{}", source, target),
            reason,
        };
        let Some(catalog) = self.catalog else {
            return Err(unresolvable("no template catalog configured".to_string()));
        };
        let template = catalog
            .get_template(&template_uri)
            .map_err(|e| unresolvable(e.to_string()))?;
        let config = template.resolve(flow.config()).map_err(unresolvable)?;

        let spec = builder
            .with_config(config)
            .with_template(template_uri.as_str())
            .build();
        log::info!(
            "Resolved work unit '{}' from template '{}' with {} properties",
            spec.uri(),
            template_uri,
            spec.config().len()
        );
        Ok(Materialized::Resolved(spec))
    }
}
