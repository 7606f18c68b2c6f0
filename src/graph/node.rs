use serde::{Deserialize, Serialize};
use std::fmt;

/// A named logical execution endpoint, one vertex of the routing graph.
///
/// Two nodes with the same name are the same vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceNode {
    name: String,
}

impl ServiceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn node_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ServiceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for ServiceNode {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ServiceNode {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
