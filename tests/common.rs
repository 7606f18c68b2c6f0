//! Common test utilities for building topologies, flows and compilers.
use async_trait::async_trait;
use multihop::prelude::*;
use std::sync::Arc;
use std::time::Duration;

pub const EAST_ENGINE: &str = "azkaban://east:8443";
pub const WEST_ENGINE: &str = "gobblin://west:9000";
pub const FLOW_URI: &str = "flow://etl/daily-events";

#[allow(dead_code)]
pub fn engine(uri: &str) -> ExecutionEngine {
    ExecutionEngine::parse(uri).expect("test engine URI must parse")
}

/// Creates the diamond topology used across the tests, on a single engine.
///
/// `A -> B` (5), `B -> D` (5), `A -> C` (1), `C -> D` (1): the cheapest
/// route from A to D is `A -> C -> D` with total weight 2.
#[allow(dead_code)]
pub fn diamond_topology() -> TopologySpec {
    let executor = InMemorySpecExecutor::new(
        engine(EAST_ENGINE),
        vec![
            Capability::new("A", "B").with_weight(5.0),
            Capability::new("B", "D").with_weight(5.0),
            Capability::new("A", "C").with_weight(1.0),
            Capability::new("C", "D").with_weight(1.0),
        ],
    );
    TopologySpec::new("topology/east", Arc::new(executor))
}

#[allow(dead_code)]
pub fn topology(uri: &str, engine_uri: &str, capabilities: Vec<Capability>) -> TopologySpec {
    TopologySpec::new(
        uri,
        Arc::new(InMemorySpecExecutor::new(engine(engine_uri), capabilities)),
    )
}

/// A flow from A to D with no explicit path.
#[allow(dead_code)]
pub fn a_to_d_flow() -> FlowSpec {
    FlowSpec::parse(FLOW_URI, FlowConfig::new())
        .expect("test flow URI must parse")
        .with_source("A")
        .with_destination("D")
}

#[allow(dead_code)]
pub fn diamond_compiler(config: FlowConfig) -> Compiler {
    Compiler::builder(config)
        .with_topology(diamond_topology())
        .build()
        .expect("test compiler must build")
}

/// A capability query that always reports the engine as down.
#[allow(dead_code)]
pub struct FailingExecutor {
    pub engine: ExecutionEngine,
}

#[async_trait]
impl SpecExecutor for FailingExecutor {
    fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    async fn capabilities(&self) -> std::result::Result<Vec<Capability>, TopologyError> {
        Err(TopologyError::Unavailable("connection refused".to_string()))
    }
}

/// A capability query that answers only after `delay`.
#[allow(dead_code)]
pub struct SlowExecutor {
    pub engine: ExecutionEngine,
    pub delay: Duration,
    pub capabilities: Vec<Capability>,
}

#[async_trait]
impl SpecExecutor for SlowExecutor {
    fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    async fn capabilities(&self) -> std::result::Result<Vec<Capability>, TopologyError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.capabilities.clone())
    }
}

/// The identity the compiler gives the edge `source -> target` on an engine.
#[allow(dead_code)]
pub fn identity(source: &str, target: &str, engine_uri: &str) -> EdgeIdentity {
    EdgeIdentity::new(
        &ServiceNode::new(source),
        &ServiceNode::new(target),
        &engine(engine_uri),
    )
}
