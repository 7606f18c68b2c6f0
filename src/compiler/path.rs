use crate::error::CompileError;
use crate::graph::{FlowEdge, FlowGraph, ServiceNode};
use itertools::Itertools;
use petgraph::Direction;
use petgraph::algo::astar;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Resolves the concrete hop sequence for one request over an assembled graph.
pub struct PathSelector<'g> {
    graph: &'g FlowGraph,
}

impl<'g> PathSelector<'g> {
    pub fn new(graph: &'g FlowGraph) -> Self {
        Self { graph }
    }

    /// Uses `explicit_path` when it verifies, otherwise falls back to the
    /// shortest weighted path. A rejected explicit path is never retried.
    pub fn select(
        &self,
        source: &ServiceNode,
        sink: &ServiceNode,
        explicit_path: Option<&str>,
    ) -> Result<Vec<FlowEdge>, CompileError> {
        if let Some(path) = explicit_path {
            log::info!("Starting to evaluate specified path [{}]", path);
            match self.verify_explicit_path(path, source, sink) {
                Ok(edges) => {
                    log::info!("Specified path [{}] successfully verified", path);
                    return Ok(edges);
                }
                Err(e) => {
                    log::error!("Will not execute specified path: {}", e);
                    log::info!("Falling back to shortest path search from '{}' to '{}'", source, sink);
                }
            }
        }
        self.shortest_path(source, sink)
    }

    /// Checks a comma separated node list hop by hop. Every consecutive pair
    /// must be present and connected; there is no partial acceptance.
    /// The list must start at `source` and end at `sink`, so a policy-wide
    /// path only applies to flows with matching endpoints.
    ///
    /// For each pair the first edge in the multigraph's iteration order is
    /// used, so with parallel edges the engine picked is not specified.
    pub fn verify_explicit_path(
        &self,
        path: &str,
        source: &ServiceNode,
        sink: &ServiceNode,
    ) -> Result<Vec<FlowEdge>, CompileError> {
        let invalid = |reason: String| CompileError::InvalidExplicitPath {
            path: path.to_string(),
            reason,
        };

        let hops: Vec<ServiceNode> = path
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ServiceNode::new)
            .collect();

        if hops.len() < 2 {
            return Err(invalid("a path needs at least two nodes".to_string()));
        }
        if hops.first() != Some(source) || hops.last() != Some(sink) {
            return Err(invalid(format!(
                "path must run from '{}' to '{}'",
                source, sink
            )));
        }

        let mut edges = Vec::with_capacity(hops.len() - 1);
        for (from, to) in hops.iter().tuple_windows() {
            for node in [from, to] {
                if !self.graph.contains_node(node) {
                    return Err(invalid(format!("node '{}' is not in the graph", node)));
                }
            }
            let edge = self
                .graph
                .first_edge_between(from, to)
                .ok_or_else(|| invalid(format!("no edge from '{}' to '{}'", from, to)))?;
            edges.push(edge.clone());
        }
        Ok(edges)
    }

    /// Minimal total weight path from `source` to `sink`.
    ///
    /// Among equal-weight paths any one may be returned.
    pub fn shortest_path(
        &self,
        source: &ServiceNode,
        sink: &ServiceNode,
    ) -> Result<Vec<FlowEdge>, CompileError> {
        let no_path = || CompileError::NoPathFound {
            from: source.to_string(),
            to: sink.to_string(),
        };

        if source == sink {
            return Err(no_path());
        }
        let start = self.graph.index_of(source).ok_or_else(no_path)?;
        let goal = self.graph.index_of(sink).ok_or_else(no_path)?;

        // A* with a zero heuristic is Dijkstra that stops at the goal.
        let (_, nodes) = astar(
            self.graph.inner(),
            start,
            |node| node == goal,
            |edge| edge.weight().weight(),
            |_| 0.0,
        )
        .ok_or_else(no_path)?;

        nodes
            .iter()
            .tuple_windows()
            .map(|(from, to)| self.cheapest_edge(*from, *to).cloned().ok_or_else(no_path))
            .collect()
    }

    fn cheapest_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&'g FlowEdge> {
        self.graph
            .inner()
            .edges_directed(from, Direction::Outgoing)
            .filter(|edge| edge.target() == to)
            .map(|edge| edge.weight())
            .min_by(|a, b| a.weight().total_cmp(&b.weight()))
    }
}
