use super::node::ServiceNode;
use crate::error::CompileError;
use crate::flow::keys::EDGE_WEIGHT_KEY;
use crate::topology::ExecutionEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Weight given to an edge whose properties carry no static weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Stable identity of a capability: the `(source, target, engine)` triple.
///
/// The same capability reported twice has the same identity, while parallel
/// edges backed by different engines stay distinct. Displays as
/// `source:target:engineUri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeIdentity {
    source: ServiceNode,
    target: ServiceNode,
    engine: ExecutionEngine,
}

impl EdgeIdentity {
    pub fn new(source: &ServiceNode, target: &ServiceNode, engine: &ExecutionEngine) -> Self {
        Self {
            source: source.clone(),
            target: target.clone(),
            engine: engine.clone(),
        }
    }

    pub fn source(&self) -> &ServiceNode {
        &self.source
    }

    pub fn target(&self) -> &ServiceNode {
        &self.target
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }
}

impl fmt::Display for EdgeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.target, self.engine)
    }
}

/// Free-form properties advertised with a capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowEdgeProps {
    properties: BTreeMap<String, String>,
}

impl FlowEdgeProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_weight(self, weight: f64) -> Self {
        self.with_property(EDGE_WEIGHT_KEY, weight.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The static weight advertised under `flow.edge.weight`, if any.
    /// An unparseable value is reported as `NaN` so it fails weight validation.
    pub fn static_weight(&self) -> Option<f64> {
        self.get(EDGE_WEIGHT_KEY)
            .map(|raw| raw.trim().parse::<f64>().unwrap_or(f64::NAN))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.properties.iter()
    }
}

impl From<BTreeMap<String, String>> for FlowEdgeProps {
    fn from(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }
}

/// A directed, weighted capability link between two service nodes, backed by
/// exactly one execution engine.
///
/// Equality and hashing go through the edge identity only; weight and
/// properties do not participate.
#[derive(Debug, Clone, Serialize)]
pub struct FlowEdge {
    source: ServiceNode,
    target: ServiceNode,
    engine: ExecutionEngine,
    props: FlowEdgeProps,
    weight: f64,
    #[serde(skip)]
    identity: EdgeIdentity,
}

impl FlowEdge {
    /// Builds an edge weighted by its static property, or `DEFAULT_EDGE_WEIGHT`.
    pub fn new(
        source: ServiceNode,
        target: ServiceNode,
        props: FlowEdgeProps,
        engine: ExecutionEngine,
    ) -> Result<Self, CompileError> {
        let mut edge = Self::unweighted(source, target, props, engine);
        edge.apply_static_weight()?;
        Ok(edge)
    }

    /// An edge carrying `DEFAULT_EDGE_WEIGHT` whose advertised weight has not
    /// been validated yet.
    pub(crate) fn unweighted(
        source: ServiceNode,
        target: ServiceNode,
        props: FlowEdgeProps,
        engine: ExecutionEngine,
    ) -> Self {
        let identity = EdgeIdentity::new(&source, &target, &engine);
        Self {
            source,
            target,
            engine,
            props,
            weight: DEFAULT_EDGE_WEIGHT,
            identity,
        }
    }

    /// Sets the weight from the `flow.edge.weight` property, if present.
    pub(crate) fn apply_static_weight(&mut self) -> Result<(), CompileError> {
        let weight = self.props.static_weight().unwrap_or(DEFAULT_EDGE_WEIGHT);
        self.set_weight(weight)
    }

    pub fn source(&self) -> &ServiceNode {
        &self.source
    }

    pub fn target(&self) -> &ServiceNode {
        &self.target
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    pub fn props(&self) -> &FlowEdgeProps {
        &self.props
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn identity(&self) -> &EdgeIdentity {
        &self.identity
    }

    /// Replaces the routing weight. Lower is cheaper.
    pub fn set_weight(&mut self, weight: f64) -> Result<(), CompileError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CompileError::InvalidEdgeWeight {
                edge: self.identity.to_string(),
                weight,
            });
        }
        self.weight = weight;
        Ok(())
    }
}

impl PartialEq for FlowEdge {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for FlowEdge {}

impl Hash for FlowEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} via {} (weight {})",
            self.source, self.target, self.engine, self.weight
        )
    }
}
