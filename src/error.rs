use thiserror::Error;

/// Errors that can abort a flow compilation.
///
/// A compile either yields a complete plan or exactly one of these; partial
/// plans are never returned.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("Capability query for topology '{topology}' (engine '{engine}') failed: {message}")]
    TopologyQueryFailed {
        topology: String,
        engine: String,
        message: String,
    },

    #[error("No path found from '{from}' to '{to}'")]
    NoPathFound { from: String, to: String },

    #[error("Explicit path '{path}' is invalid: {reason}")]
    InvalidExplicitPath { path: String, reason: String },

    #[error("Template '{template_uri}' advertised for hop '{hop}' could not be resolved: {reason}")]
    TemplateResolution {
        template_uri: String,
        hop: String,
        reason: String,
    },

    #[error("Edge '{edge}' has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidEdgeWeight { edge: String, weight: f64 },

    #[error("Flow '{flow}' is missing required configuration key '{key}'")]
    MissingFlowConfig { flow: String, key: String },

    #[error("Invalid flow URI '{uri}': {message}")]
    InvalidFlowUri { uri: String, message: String },
}

/// Errors raised while turning administrator declarations into a routing policy.
///
/// These are fatal at compiler construction (or policy reload) time.
#[derive(Error, Debug, Clone)]
pub enum PolicyConfigurationError {
    #[error("No routing policy is registered under the name '{0}'")]
    UnknownPolicy(String),

    #[error("Malformed blocked connection '{entry}': {reason}")]
    MalformedBlockedConnection { entry: String, reason: String },

    #[error("Malformed blocked node list entry '{0}'")]
    MalformedBlockedNode(String),

    #[error("Malformed edge weight override '{entry}': {reason}")]
    MalformedEdgeWeight { entry: String, reason: String },

    #[error("Invalid value '{value}' for key '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Errors reported by a topology's capability query.
#[derive(Error, Debug, Clone)]
pub enum TopologyError {
    #[error("Execution engine is unavailable: {0}")]
    Unavailable(String),

    #[error("Capability query failed: {0}")]
    QueryFailed(String),

    #[error("Invalid execution engine URI '{uri}': {message}")]
    InvalidEngineUri { uri: String, message: String },
}

/// Errors reported by a template catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Template '{0}' not found in catalog")]
    NotFound(String),

    #[error("Template catalog failure: {0}")]
    Backend(String),
}

/// Errors that can occur while loading JSON manifests.
#[derive(Error, Debug, Clone)]
pub enum ManifestError {
    #[error("Failed to read manifest '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

/// Errors that can occur when converting a custom user format into a `FlowSpec`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom flow data: {0}")]
    ValidationError(String),
}
