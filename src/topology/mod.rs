//! The topology registry: which execution engines exist and which node pairs
//! each of them can service.

use crate::error::TopologyError;
use crate::graph::{FlowEdgeProps, ServiceNode};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

mod engine;
mod memory;

pub use engine::ExecutionEngine;
pub use memory::InMemorySpecExecutor;

/// One `(source -> target)` pair an engine advertises, with its edge properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
    pub source: ServiceNode,
    pub target: ServiceNode,
    pub props: FlowEdgeProps,
}

impl Capability {
    pub fn new(source: impl Into<ServiceNode>, target: impl Into<ServiceNode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            props: FlowEdgeProps::default(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.props = self.props.with_weight(weight);
        self
    }

    pub fn with_props(mut self, props: FlowEdgeProps) -> Self {
        self.props = props;
        self
    }
}

/// An execution engine as seen by the compiler: a handle plus an asynchronous
/// query for the node pairs it can run.
#[async_trait]
pub trait SpecExecutor: Send + Sync {
    fn engine(&self) -> &ExecutionEngine;

    async fn capabilities(&self) -> Result<Vec<Capability>, TopologyError>;
}

/// A registered topology entry.
#[derive(Clone)]
pub struct TopologySpec {
    uri: String,
    description: String,
    executor: Arc<dyn SpecExecutor>,
}

impl TopologySpec {
    pub fn new(uri: impl Into<String>, executor: Arc<dyn SpecExecutor>) -> Self {
        Self {
            uri: uri.into(),
            description: String::new(),
            executor,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn executor(&self) -> &Arc<dyn SpecExecutor> {
        &self.executor
    }
}

impl fmt::Debug for TopologySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologySpec")
            .field("uri", &self.uri)
            .field("engine", self.executor.engine())
            .finish()
    }
}

/// The set of known topologies, keyed by URI.
///
/// Topologies may be added and removed while compiles run; each compile works
/// on the snapshot it takes at its start.
#[derive(Debug, Default)]
pub struct TopologyRegistry {
    specs: RwLock<BTreeMap<String, TopologySpec>>,
}

impl TopologyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a topology, replacing any previous entry with the same URI.
    pub fn register(&self, spec: TopologySpec) -> Option<TopologySpec> {
        log::info!("Registering topology '{}'", spec.uri());
        self.specs.write().insert(spec.uri().to_string(), spec)
    }

    pub fn remove(&self, uri: &str) -> Option<TopologySpec> {
        log::info!("Removing topology '{}'", uri);
        self.specs.write().remove(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.specs.read().contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.specs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.read().is_empty()
    }

    /// A point-in-time copy of the registered topologies, ordered by URI.
    pub fn snapshot(&self) -> Vec<TopologySpec> {
        self.specs.read().values().cloned().collect()
    }
}
