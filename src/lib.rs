//! modgraph - module dependency descriptors and resolution
//!
//! Each module of a modular build declares which other modules it depends on,
//! split into public dependencies (re-exported to everything that depends on
//! the module) and private ones (used only by its implementation). Conditional
//! rules add further dependencies for particular build contexts, such as a
//! debugging module that only editor builds need.
//!
//! Given the declared descriptors and one build context, the resolver
//! produces a validated, acyclic dependency graph and the public surface of
//! every module. Resolution is deterministic: identical inputs give identical
//! graphs, edge order and diagnostics.
//!
//! # Modules
//!
//! - [`descriptor`] - Immutable per-module dependency declarations
//! - [`context`] - Build context axes and rule conditions
//! - [`resolver`] - Rule evaluation, graph construction and visibility propagation
//! - [`manifest`] - Loading descriptors from `modgraph.toml`
//! - [`core`] - Errors and the shared visibility type
//! - [`cli`] - The `modgraph` command-line interface
//!
//! # Example
//!
//! ```rust
//! use modgraph_cli::context::{BuildContext, Condition, TargetKind};
//! use modgraph_cli::descriptor::{ConditionalRule, ModuleDescriptor};
//! use modgraph_cli::resolver::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! for name in ["Core", "Engine", "PoseSearch", "GameplayDebugger"] {
//!     builder.register(ModuleDescriptor::builder(name).build()?)?;
//! }
//! builder.register(
//!     ModuleDescriptor::builder("GASP")
//!         .public(["Core", "Engine"])
//!         .private(["PoseSearch"])
//!         .rule(ConditionalRule::private(
//!             Condition::target(TargetKind::Editor),
//!             ["GameplayDebugger"],
//!         ))
//!         .build()?,
//! )?;
//!
//! let editor = builder.resolve(&BuildContext::new(TargetKind::Editor))?;
//! assert!(editor.resolved("GASP").unwrap().contains("GameplayDebugger"));
//! assert_eq!(editor.public_surface("GASP").unwrap(), ["Core", "Engine"]);
//! # Ok::<(), modgraph_cli::core::ModgraphError>(())
//! ```

pub mod cli;
pub mod context;
pub mod core;
pub mod descriptor;
pub mod manifest;
pub mod resolver;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
