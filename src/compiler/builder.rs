use crate::error::CompileError;
use crate::graph::{FlowEdge, FlowGraph, ServiceNode};
use crate::policy::RoutingPolicy;
use crate::topology::{Capability, TopologySpec};
use futures::future::try_join_all;
use std::time::Duration;

/// Responsible for assembling a fresh weighted multigraph from a topology
/// snapshot and applying the routing policy to it.
pub(crate) struct GraphBuilder<'a> {
    policy: &'a RoutingPolicy,
    query_timeout: Duration,
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(policy: &'a RoutingPolicy, query_timeout: Duration) -> Self {
        Self {
            policy,
            query_timeout,
        }
    }

    /// Queries every topology concurrently, then adds their capabilities in
    /// snapshot order. Any failed or timed out query aborts the build.
    pub(crate) async fn build(&self, topologies: &[TopologySpec]) -> Result<FlowGraph, CompileError> {
        let answers = try_join_all(topologies.iter().map(|spec| self.query(spec))).await?;

        let mut graph = FlowGraph::new();
        for (spec, capabilities) in topologies.iter().zip(answers) {
            self.add_capabilities(&mut graph, spec, capabilities)?;
        }
        self.apply_policy(&mut graph);
        Ok(graph)
    }

    async fn query(&self, spec: &TopologySpec) -> Result<Vec<Capability>, CompileError> {
        let engine = spec.executor().engine();
        let failure = |message: String| {
            log::error!(
                "Cannot determine capabilities of topology '{}': {}",
                spec.uri(),
                message
            );
            CompileError::TopologyQueryFailed {
                topology: spec.uri().to_string(),
                engine: engine.to_string(),
                message,
            }
        };

        match tokio::time::timeout(self.query_timeout, spec.executor().capabilities()).await {
            Ok(Ok(capabilities)) => Ok(capabilities),
            Ok(Err(e)) => Err(failure(e.to_string())),
            Err(_) => Err(failure(format!(
                "timed out after {} ms",
                self.query_timeout.as_millis()
            ))),
        }
    }

    fn add_capabilities(
        &self,
        graph: &mut FlowGraph,
        spec: &TopologySpec,
        capabilities: Vec<Capability>,
    ) -> Result<(), CompileError> {
        let engine = spec.executor().engine();
        for capability in capabilities {
            graph.add_node(capability.source.clone());
            graph.add_node(capability.target.clone());

            // A policy weight replaces the advertised one before it is validated.
            let mut edge = FlowEdge::unweighted(
                capability.source,
                capability.target,
                capability.props,
                engine.clone(),
            );
            match self.policy.adjusted_weight(&edge) {
                Some(weight) => edge.set_weight(weight)?,
                None => edge.apply_static_weight()?,
            }

            // In a multigraph a capability reported twice is skipped, not merged.
            let identity = edge.identity().clone();
            if !graph.add_edge(edge) {
                log::debug!("Skipping duplicate capability '{}'", identity);
            }
        }
        Ok(())
    }

    /// Removes policy-excluded edges and blocked nodes (with their edges).
    /// Exclusions are computed against the fully assembled graph.
    pub(crate) fn apply_policy(&self, graph: &mut FlowGraph) {
        let excluded = self.policy.excluded_edges(graph);

        for name in self.policy.blocked_node_names() {
            if graph.remove_node(&ServiceNode::new(name.as_str())) {
                log::debug!("Removed blocked node '{}'", name);
            }
        }
        for identity in &excluded {
            if graph.remove_edge(identity).is_some() {
                log::debug!("Removed blocked edge '{}'", identity);
            }
        }

        log::debug!(
            "Routing graph after policy '{}': {} nodes, {} edges",
            self.policy.name(),
            graph.node_count(),
            graph.edge_count()
        );
    }
}
