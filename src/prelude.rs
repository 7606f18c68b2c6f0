//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! multihop crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use multihop::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let config = FlowConfig::from_file("path/to/compiler.json")?;
//! let topologies = TopologyManifest::from_file("path/to/topology.json")?.into_topology_specs()?;
//!
//! let mut builder = Compiler::builder(config);
//! for spec in topologies {
//!     builder = builder.with_topology(spec);
//! }
//! let compiler = builder.build()?;
//!
//! let flow = FlowManifest::from_file("path/to/flow.json")?.into_flow_spec()?;
//! let plan = compiler.compile(&flow).await?;
//! println!("Route: {}", plan.route().join(" -> "));
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{Compiler, CompilerBuilder, Materialized, PathSelector, WorkUnitFactory};
pub use crate::plan::{ExecutionPlan, PlanStep};

// Graph model
pub use crate::graph::{EdgeIdentity, FlowEdge, FlowEdgeProps, FlowGraph, ServiceNode};

// Topology
pub use crate::topology::{
    Capability, ExecutionEngine, InMemorySpecExecutor, SpecExecutor, TopologyRegistry,
    TopologySpec,
};

// Policy
pub use crate::policy::{PolicyDeclarations, PolicyRegistry, RoutingPolicy, ServicePolicy};

// Flows, work units and templates
pub use crate::flow::{FlowConfig, FlowSpec, IntoFlowSpec, JobSpec};
pub use crate::template::{EdgeTemplates, InMemoryTemplateCatalog, JobTemplate, TemplateCatalog};

// Manifests
pub use crate::manifest::{FlowManifest, JsonManifest, TemplateManifest, TopologyManifest};

// Error types
pub use crate::error::{
    CatalogError, CompileError, ConversionError, ManifestError, PolicyConfigurationError,
    TopologyError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
