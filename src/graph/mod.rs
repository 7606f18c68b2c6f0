//! The weighted directed multigraph the compiler routes over.
//!
//! Vertices are `ServiceNode`s and edges are `FlowEdge`s. Parallel edges between
//! the same pair of nodes are allowed as long as they are backed by different
//! engines; an edge whose identity is already present is never added twice.

use crate::error::CompileError;
use ahash::AHashMap;
use petgraph::Direction;
use petgraph::dot::Dot;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

mod edge;
mod node;

pub use edge::{DEFAULT_EDGE_WEIGHT, EdgeIdentity, FlowEdge, FlowEdgeProps};
pub use node::ServiceNode;

#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    graph: StableDiGraph<ServiceNode, FlowEdge>,
    node_index: AHashMap<ServiceNode, NodeIndex>,
    edge_index: AHashMap<EdgeIdentity, EdgeIndex>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex if it is not present yet. Idempotent.
    pub fn add_node(&mut self, node: ServiceNode) -> NodeIndex {
        if let Some(index) = self.node_index.get(&node) {
            return *index;
        }
        let index = self.graph.add_node(node.clone());
        self.node_index.insert(node, index);
        index
    }

    /// Adds an edge (and its endpoints) unless an edge with the same identity exists.
    /// Returns `false` when the edge was suppressed as a duplicate.
    pub fn add_edge(&mut self, edge: FlowEdge) -> bool {
        if self.edge_index.contains_key(edge.identity()) {
            return false;
        }
        let from = self.add_node(edge.source().clone());
        let to = self.add_node(edge.target().clone());
        let identity = edge.identity().clone();
        let index = self.graph.add_edge(from, to, edge);
        self.edge_index.insert(identity, index);
        true
    }

    pub fn contains_node(&self, node: &ServiceNode) -> bool {
        self.node_index.contains_key(node)
    }

    pub fn contains_edge(&self, identity: &EdgeIdentity) -> bool {
        self.edge_index.contains_key(identity)
    }

    pub fn edge(&self, identity: &EdgeIdentity) -> Option<&FlowEdge> {
        self.edge_index
            .get(identity)
            .and_then(|index| self.graph.edge_weight(*index))
    }

    pub fn has_edge_between(&self, from: &ServiceNode, to: &ServiceNode) -> bool {
        self.first_edge_between(from, to).is_some()
    }

    /// All parallel edges from `from` to `to`, in the multigraph's iteration order.
    pub fn edges_between(&self, from: &ServiceNode, to: &ServiceNode) -> Vec<&FlowEdge> {
        let (Some(a), Some(b)) = (self.node_index.get(from), self.node_index.get(to)) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(*a, Direction::Outgoing)
            .filter(|e| e.target() == *b)
            .map(|e| e.weight())
            .collect()
    }

    /// The first edge from `from` to `to` in iteration order.
    ///
    /// When parallel edges exist the choice follows the storage order of the
    /// underlying graph and is not otherwise specified.
    pub fn first_edge_between(&self, from: &ServiceNode, to: &ServiceNode) -> Option<&FlowEdge> {
        let a = self.node_index.get(from)?;
        let b = self.node_index.get(to)?;
        self.graph
            .edges_directed(*a, Direction::Outgoing)
            .find(|e| e.target() == *b)
            .map(|e| e.weight())
    }

    pub fn outgoing(&self, node: &ServiceNode) -> Vec<&FlowEdge> {
        match self.node_index.get(node) {
            Some(index) => self
                .graph
                .edges_directed(*index, Direction::Outgoing)
                .map(|e| e.weight())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn remove_edge(&mut self, identity: &EdgeIdentity) -> Option<FlowEdge> {
        let index = self.edge_index.remove(identity)?;
        self.graph.remove_edge(index)
    }

    /// Removes a vertex together with every incident edge.
    pub fn remove_node(&mut self, node: &ServiceNode) -> bool {
        let Some(index) = self.node_index.remove(node) else {
            return false;
        };
        let incident: Vec<EdgeIdentity> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .chain(self.graph.edges_directed(index, Direction::Incoming))
            .map(|e| e.weight().identity().clone())
            .collect();
        for identity in incident {
            self.edge_index.remove(&identity);
        }
        self.graph.remove_node(index);
        true
    }

    /// Retunes one edge's weight in place, without rebuilding the graph.
    /// Returns `Ok(false)` if no such edge exists.
    pub fn set_edge_weight(
        &mut self,
        identity: &EdgeIdentity,
        weight: f64,
    ) -> Result<bool, CompileError> {
        let Some(index) = self.edge_index.get(identity) else {
            return Ok(false);
        };
        match self.graph.edge_weight_mut(*index) {
            Some(edge) => edge.set_weight(weight).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ServiceNode> {
        self.graph
            .node_indices()
            .filter_map(|index| self.graph.node_weight(index))
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.graph
            .edge_indices()
            .filter_map(|index| self.graph.edge_weight(index))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }

    pub(crate) fn index_of(&self, node: &ServiceNode) -> Option<NodeIndex> {
        self.node_index.get(node).copied()
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<ServiceNode, FlowEdge> {
        &self.graph
    }
}
