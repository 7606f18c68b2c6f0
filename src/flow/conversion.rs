use super::definition::FlowSpec;
use crate::error::ConversionError;

/// A trait for custom request models that can be converted into a `FlowSpec`.
///
/// Implement this on your own request structs to feed them to the compiler
/// without going through the JSON flow manifest.
///
/// # Example
///
/// ```rust,no_run
/// use multihop::prelude::*;
/// use multihop::error::ConversionError;
///
/// struct IngestRequest { name: String, from: String, to: String }
///
/// impl IntoFlowSpec for IngestRequest {
///     fn into_flow_spec(self) -> std::result::Result<FlowSpec, ConversionError> {
///         let uri = format!("flow://ingest/{}", self.name);
///         FlowSpec::parse(&uri, FlowConfig::new())
///             .map(|spec| spec.with_source(&self.from).with_destination(&self.to))
///             .map_err(|e| ConversionError::ValidationError(e.to_string()))
///     }
/// }
/// ```
pub trait IntoFlowSpec {
    /// Consumes the object and converts it into a compilable flow request.
    fn into_flow_spec(self) -> Result<FlowSpec, ConversionError>;
}
