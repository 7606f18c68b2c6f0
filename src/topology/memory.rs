use super::{Capability, ExecutionEngine, SpecExecutor};
use crate::error::TopologyError;
use async_trait::async_trait;

/// A spec executor whose capabilities are fixed at construction.
///
/// Used for topologies loaded from manifests and for tests.
#[derive(Debug, Clone)]
pub struct InMemorySpecExecutor {
    engine: ExecutionEngine,
    capabilities: Vec<Capability>,
}

impl InMemorySpecExecutor {
    pub fn new(engine: ExecutionEngine, capabilities: Vec<Capability>) -> Self {
        Self {
            engine,
            capabilities,
        }
    }

    /// An executor that advertises nothing; only its handle is meaningful.
    pub fn dummy(engine: ExecutionEngine) -> Self {
        Self::new(engine, Vec::new())
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }
}

#[async_trait]
impl SpecExecutor for InMemorySpecExecutor {
    fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    async fn capabilities(&self) -> Result<Vec<Capability>, TopologyError> {
        Ok(self.capabilities.clone())
    }
}
