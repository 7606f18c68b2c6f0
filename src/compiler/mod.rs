use crate::error::{CompileError, PolicyConfigurationError};
use crate::flow::keys::{DEFAULT_TOPOLOGY_QUERY_TIMEOUT_MS, TOPOLOGY_QUERY_TIMEOUT_MS_KEY};
use crate::flow::{FlowConfig, FlowSpec};
use crate::graph::FlowGraph;
use crate::plan::ExecutionPlan;
use crate::policy::{PolicyFactory, PolicyRegistry, RoutingPolicy};
use crate::template::{EdgeTemplates, TemplateCatalog};
use crate::topology::{TopologyRegistry, TopologySpec};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "debug-tools")]
use std::fs;

mod builder;
mod path;
mod work_unit;

use builder::GraphBuilder;
pub use path::PathSelector;
pub use work_unit::{Materialized, WorkUnitFactory, work_unit_uri};

/// Compiles flow requests into ordered, per-hop execution plans.
///
/// Every call to [`Compiler::compile`] rebuilds the routing graph from the
/// current topology snapshot and policy snapshot; no graph is shared between
/// calls, so concurrent compiles need no coordination. Must be driven from a
/// Tokio runtime (topology queries are timed with `tokio::time`).
pub struct Compiler {
    topologies: TopologyRegistry,
    policy_registry: PolicyRegistry,
    policy: RwLock<Arc<RoutingPolicy>>,
    catalog: Option<Arc<dyn TemplateCatalog>>,
    edge_templates: EdgeTemplates,
    query_timeout: Duration,
    last_graph: RwLock<Option<Arc<FlowGraph>>>,
}

pub struct CompilerBuilder {
    config: FlowConfig,
    policy_registry: PolicyRegistry,
    catalog: Option<Arc<dyn TemplateCatalog>>,
    edge_templates: EdgeTemplates,
    topologies: Vec<TopologySpec>,
    query_timeout: Option<Duration>,
}

impl CompilerBuilder {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            policy_registry: PolicyRegistry::new(),
            catalog: None,
            edge_templates: EdgeTemplates::default(),
            topologies: Vec::new(),
            query_timeout: None,
        }
    }

    pub fn with_policy_registry(mut self, registry: PolicyRegistry) -> Self {
        self.policy_registry = registry;
        self
    }

    pub fn with_policy(mut self, name: &str, factory: PolicyFactory) -> Self {
        self.policy_registry.register(name, factory);
        self
    }

    pub fn with_policy_alias(mut self, alias: &str, builtin_name: &str) -> Self {
        self.policy_registry = self.policy_registry.with_alias(alias, builtin_name);
        self
    }

    pub fn with_template_catalog(mut self, catalog: Arc<dyn TemplateCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_edge_templates(mut self, edge_templates: EdgeTemplates) -> Self {
        self.edge_templates = edge_templates;
        self
    }

    pub fn with_topology(mut self, spec: TopologySpec) -> Self {
        self.topologies.push(spec);
        self
    }

    /// Overrides `service.topology.queryTimeoutMs`.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Resolves the routing policy and timeout. Malformed declarations or an
    /// unknown policy name fail here rather than on a later compile.
    pub fn build(self) -> Result<Compiler, PolicyConfigurationError> {
        let policy = RoutingPolicy::from_config(&self.policy_registry, &self.config)?;
        let query_timeout = match self.query_timeout {
            Some(timeout) => timeout,
            None => query_timeout_from(&self.config)?,
        };

        let topologies = TopologyRegistry::new();
        for spec in self.topologies {
            topologies.register(spec);
        }

        Ok(Compiler {
            topologies,
            policy_registry: self.policy_registry,
            policy: RwLock::new(Arc::new(policy)),
            catalog: self.catalog,
            edge_templates: self.edge_templates,
            query_timeout,
            last_graph: RwLock::new(None),
        })
    }
}

fn query_timeout_from(config: &FlowConfig) -> Result<Duration, PolicyConfigurationError> {
    match config.get_non_blank(TOPOLOGY_QUERY_TIMEOUT_MS_KEY) {
        None => Ok(Duration::from_millis(DEFAULT_TOPOLOGY_QUERY_TIMEOUT_MS)),
        Some(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
            PolicyConfigurationError::InvalidValue {
                key: TOPOLOGY_QUERY_TIMEOUT_MS_KEY.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            }
        }),
    }
}

impl Compiler {
    pub fn builder(config: FlowConfig) -> CompilerBuilder {
        CompilerBuilder::new(config)
    }

    /// The live topology registry. Changes apply to compiles started afterwards.
    pub fn topologies(&self) -> &TopologyRegistry {
        &self.topologies
    }

    /// The current policy snapshot.
    pub fn policy(&self) -> Arc<RoutingPolicy> {
        self.policy.read().clone()
    }

    /// Publishes a new policy snapshot built from `config`. Compiles already
    /// running keep the snapshot they started with.
    pub fn reload_policy(&self, config: &FlowConfig) -> Result<(), PolicyConfigurationError> {
        let policy = RoutingPolicy::from_config(&self.policy_registry, config)?;
        *self.policy.write() = Arc::new(policy);
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// The graph built by the most recent compile, for diagnostics only. It
    /// may be stale as soon as it is returned.
    pub fn last_graph(&self) -> Option<Arc<FlowGraph>> {
        self.last_graph.read().clone()
    }

    /// Compiles `flow` into one work unit per hop, bound to the engine of that hop.
    ///
    /// The plan's iteration order is the execution order. Any failure aborts
    /// the whole compile; no partial plan is returned.
    pub async fn compile(&self, flow: &FlowSpec) -> Result<ExecutionPlan, CompileError> {
        let source = flow.source_identifier()?;
        let sink = flow.destination_identifier()?;
        let policy = self.policy();
        let topologies = self.topologies.snapshot();

        let graph = GraphBuilder::new(&policy, self.query_timeout)
            .build(&topologies)
            .await?;
        let graph = Arc::new(graph);
        *self.last_graph.write() = Some(Arc::clone(&graph));

        #[cfg(feature = "debug-tools")]
        self.write_debug_graph(flow, &graph);

        let explicit_path = flow.explicit_path().or(policy.data_movement_path());
        let edges = PathSelector::new(&graph).select(&source, &sink, explicit_path)?;

        let templates = self.edge_templates.populate(&graph, self.catalog.as_deref());
        let factory = WorkUnitFactory::new(self.catalog.as_deref(), &templates);

        let mut plan = ExecutionPlan::new(flow.uri().clone());
        for edge in &edges {
            let work_unit = factory.materialize(edge.source(), edge.target(), edge, flow)?;
            plan.push(work_unit.into_job_spec(), edge);
        }

        log::info!(
            "Compiled flow '{}' into {} hops: {}",
            flow.uri(),
            plan.len(),
            plan.route().join(" -> ")
        );
        Ok(plan)
    }

    #[cfg(feature = "debug-tools")]
    fn write_debug_graph(&self, flow: &FlowSpec, graph: &FlowGraph) {
        let sanitized: String = flow
            .uri()
            .path()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let path = format!("tmp/graph_{}.dot", sanitized);
        let result = fs::create_dir_all("tmp").and_then(|_| fs::write(&path, graph.to_dot()));
        match result {
            Ok(()) => log::info!("  -> Wrote routing graph to '{}'", path),
            Err(e) => log::warn!("Could not write debug graph '{}': {}", path, e),
        }
    }
}
