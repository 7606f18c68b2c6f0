use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An opaque handle to the external system that runs work for an edge.
///
/// The compiler never inspects or invokes an engine; it only copies the handle
/// from the chosen edge into the execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionEngine {
    uri: Url,
}

impl ExecutionEngine {
    pub fn new(uri: Url) -> Self {
        Self { uri }
    }

    /// Parses an engine handle from its URI string, e.g. `azkaban://etl-cluster:8443`.
    pub fn parse(uri: &str) -> Result<Self, TopologyError> {
        Url::parse(uri)
            .map(Self::new)
            .map_err(|e| TopologyError::InvalidEngineUri {
                uri: uri.to_string(),
                message: e.to_string(),
            })
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }
}

impl fmt::Display for ExecutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}
