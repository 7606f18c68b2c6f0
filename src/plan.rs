use crate::flow::JobSpec;
use crate::graph::{EdgeIdentity, FlowEdge, ServiceNode};
use crate::topology::ExecutionEngine;
use serde::{Deserialize, Serialize};
use url::Url;

/// One hop of a compiled plan: the work unit and the engine that runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub work_unit: JobSpec,
    pub engine: ExecutionEngine,
    pub source: ServiceNode,
    pub target: ServiceNode,
    pub edge: EdgeIdentity,
    pub weight: f64,
}

/// The compiler's output: work units mapped to engines, in execution order.
///
/// Iteration order is the order hops must run in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    flow_uri: Url,
    steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    pub fn new(flow_uri: Url) -> Self {
        Self {
            flow_uri,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, work_unit: JobSpec, edge: &FlowEdge) {
        self.steps.push(PlanStep {
            work_unit,
            engine: edge.engine().clone(),
            source: edge.source().clone(),
            target: edge.target().clone(),
            edge: edge.identity().clone(),
            weight: edge.weight(),
        });
    }

    pub fn flow_uri(&self) -> &Url {
        &self.flow_uri
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `(work unit, engine)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&JobSpec, &ExecutionEngine)> {
        self.steps.iter().map(|s| (&s.work_unit, &s.engine))
    }

    pub fn work_unit_uris(&self) -> Vec<&Url> {
        self.steps.iter().map(|s| s.work_unit.uri()).collect()
    }

    /// Node names visited, e.g. `["A", "C", "D"]`.
    pub fn route(&self) -> Vec<&str> {
        let mut route: Vec<&str> = self
            .steps
            .iter()
            .map(|s| s.source.node_name())
            .collect();
        if let Some(last) = self.steps.last() {
            route.push(last.target.node_name());
        }
        route
    }

    pub fn total_weight(&self) -> f64 {
        self.steps.iter().map(|s| s.weight).sum()
    }
}

impl IntoIterator for ExecutionPlan {
    type Item = (JobSpec, ExecutionEngine);
    type IntoIter =
        std::iter::Map<std::vec::IntoIter<PlanStep>, fn(PlanStep) -> (JobSpec, ExecutionEngine)>;

    fn into_iter(self) -> Self::IntoIter {
        let into_pair: fn(PlanStep) -> (JobSpec, ExecutionEngine) = |s| (s.work_unit, s.engine);
        self.steps.into_iter().map(into_pair)
    }
}
