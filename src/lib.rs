//! # Multihop - Multi-Hop Flow Compiler
//!
//! **Multihop** turns a declarative request to move data from a logical source
//! to a logical sink into a concrete, ordered sequence of execution hops across
//! a changing topology of execution engines, and emits one work unit per hop
//! bound to the engine that will run it.
//!
//! ## Core Workflow
//!
//! 1.  **Register Topologies**: Each execution engine advertises, through an
//!     asynchronous capability query, which `(source -> target)` node pairs it
//!     can service.
//! 2.  **Configure Policy**: Administrators block edges or nodes, adjust edge
//!     weights, or pin a default path. The policy is resolved once, by name,
//!     from a `PolicyRegistry`.
//! 3.  **Compile**: For every request the compiler rebuilds the weighted
//!     multigraph, applies the policy, verifies an explicit path if one was
//!     given (falling back to shortest-path search otherwise), and materializes
//!     one `JobSpec` per hop, resolving templates from a catalog when the hop's
//!     edge advertises one.
//! 4.  **Execute**: Hand the `ExecutionPlan` to your execution layer. Its
//!     iteration order is the execution order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multihop::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let engine = ExecutionEngine::parse("azkaban://etl-east:8443")?;
//! let executor = InMemorySpecExecutor::new(
//!     engine,
//!     vec![
//!         Capability::new("A", "B").with_weight(5.0),
//!         Capability::new("B", "D").with_weight(5.0),
//!         Capability::new("A", "C").with_weight(1.0),
//!         Capability::new("C", "D").with_weight(1.0),
//!     ],
//! );
//!
//! let compiler = Compiler::builder(FlowConfig::new())
//!     .with_topology(TopologySpec::new("topology/east", Arc::new(executor)))
//!     .build()?;
//!
//! let flow = FlowSpec::parse("flow://etl/daily-events", FlowConfig::new())?
//!     .with_source("A")
//!     .with_destination("D");
//!
//! let plan = compiler.compile(&flow).await?;
//! for (work_unit, engine) in plan.iter() {
//!     println!("{} -> {}", work_unit.uri(), engine);
//! }
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod error;
pub mod flow;
pub mod graph;
pub mod manifest;
pub mod plan;
pub mod policy;
pub mod prelude;
pub mod template;
pub mod topology;
