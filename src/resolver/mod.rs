//! Dependency resolution.
//!
//! Resolution turns a set of [`ModuleDescriptor`]s and one [`BuildContext`]
//! into a validated [`DependencyGraph`] and the public surface of every
//! module. It is a pure, synchronous computation over immutable inputs:
//! resolving the same inputs twice yields identical graphs, edge order and
//! surfaces.
//!
//! # Pipeline
//!
//! 1. [`GraphBuilder::register`] collects descriptors (names unique, sealed on
//!    registration)
//! 2. [`rules::evaluate`] resolves each descriptor's conditional rules against
//!    the context, merging visibilities so public always wins
//! 3. [`GraphBuilder::build`] emits one edge per resolved dependency and rejects
//!    unknown references and cycles
//! 4. [`visibility::propagate`] computes the closure of public edges per module
//!
//! [`GraphBuilder::resolve`] runs all of it and returns a [`Resolution`].
//!
//! # Example
//!
//! ```rust
//! use modgraph_cli::context::{BuildContext, Condition, TargetKind};
//! use modgraph_cli::descriptor::{ConditionalRule, ModuleDescriptor};
//! use modgraph_cli::resolver::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! builder.register(ModuleDescriptor::builder("Core").build()?)?;
//! builder.register(ModuleDescriptor::builder("Engine").public(["Core"]).build()?)?;
//! builder.register(
//!     ModuleDescriptor::builder("Tools")
//!         .rule(ConditionalRule::private(Condition::target(TargetKind::Editor), ["Engine"]))
//!         .build()?,
//! )?;
//!
//! let resolution = builder.resolve(&BuildContext::new(TargetKind::Editor))?;
//! assert_eq!(resolution.public_surface("Engine"), Some(&["Core".to_string()][..]));
//! assert_eq!(resolution.build_order(), ["Core", "Engine", "Tools"]);
//! # Ok::<(), modgraph_cli::core::ModgraphError>(())
//! ```

mod builder;
mod dependency_graph;
pub mod rules;
pub mod visibility;

pub use builder::GraphBuilder;
pub use dependency_graph::{DependencyEdge, DependencyGraph};
pub use rules::{ResolvedDependencies, ResolvedDependency};
pub use visibility::{ModuleSurface, VisibilityMap};

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::context::BuildContext;
use crate::core::{ModgraphError, Result};


/// Output of one resolution pass, ready for an external build stage.
#[derive(Debug, Clone)]
pub struct Resolution {
    context: BuildContext,
    graph: DependencyGraph,
    surfaces: VisibilityMap,
    build_order: Vec<String>,
}

impl Resolution {
    /// Compute surfaces and build order for a validated graph.
    pub(crate) fn new(context: BuildContext, graph: DependencyGraph) -> Result<Self> {
        let build_order = graph.build_order()?;
        let surfaces = visibility::propagate(&graph);
        Ok(Self {
            context,
            graph,
            surfaces,
            build_order,
        })
    }

    /// Context this resolution was computed for.
    #[must_use]
    pub const fn context(&self) -> &BuildContext {
        &self.context
    }

    /// The dependency graph.
    #[must_use]
    pub const fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Public surfaces of all modules.
    #[must_use]
    pub const fn surfaces(&self) -> &VisibilityMap {
        &self.surfaces
    }

    /// Resolved dependency set of `module`.
    #[must_use]
    pub fn resolved(&self, module: &str) -> Option<&ResolvedDependencies> {
        self.graph.resolved(module)
    }

    /// Public surface of `module`.
    #[must_use]
    pub fn public_surface(&self, module: &str) -> Option<&[String]> {
        self.surfaces.public_surface(module)
    }

    /// Modules in an order where dependencies always come first.
    #[must_use]
    pub fn build_order(&self) -> &[String] {
        &self.build_order
    }

    /// Modules the implementation of `module` can see.
    ///
    /// Its direct dependencies (any visibility) followed by the public surface
    /// of each, without repeats, in first-seen order.
    #[must_use]
    pub fn accessible_from(&self, module: &str) -> Option<Vec<String>> {
        if !self.graph.contains(module) {
            return None;
        }

        let direct = self.graph.direct_dependencies(module);
        let mut seen = HashSet::new();
        let mut accessible = Vec::new();
        for (name, _) in &direct {
            if seen.insert(*name) {
                accessible.push((*name).to_string());
            }
        }
        for (name, _) in &direct {
            for visible in self.surfaces.public_surface(name).unwrap_or_default() {
                if seen.insert(visible.as_str()) {
                    accessible.push(visible.clone());
                }
            }
        }
        Some(accessible)
    }

    /// Every module `module` needs at link time, in breadth-first order.
    #[must_use]
    pub fn transitive_dependencies(&self, module: &str) -> Vec<String> {
        self.graph.transitive_dependencies(module)
    }

    /// Modules that depend directly on `module`, in emission order.
    #[must_use]
    pub fn dependents(&self, module: &str) -> Vec<&str> {
        self.graph.dependents(module).into_iter().map(|(name, _)| name).collect()
    }

    /// Dependency tree of `module`, see [`DependencyGraph::to_tree_string`].
    #[must_use]
    pub fn to_tree_string(&self, module: &str, max_depth: Option<usize>) -> String {
        self.graph.to_tree_string(module, max_depth)
    }
}

impl Serialize for Resolution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ModuleView<'a> {
            name: &'a str,
            dependencies: Option<&'a ResolvedDependencies>,
            public_surface: &'a [String],
        }

        #[derive(Serialize)]
        struct ResolutionView<'a> {
            context: &'a BuildContext,
            modules: Vec<ModuleView<'a>>,
            edges: Vec<DependencyEdge>,
            build_order: &'a [String],
        }

        let modules = self
            .graph
            .modules()
            .map(|name| ModuleView {
                name,
                dependencies: self.graph.resolved(name),
                public_surface: self.surfaces.public_surface(name).unwrap_or_default(),
            })
            .collect();

        ResolutionView {
            context: &self.context,
            modules,
            edges: self.graph.edges(),
            build_order: &self.build_order,
        }
        .serialize(serializer)
    }
}

/// Resolve the same descriptors for several contexts concurrently.
///
/// Each context is resolved on the blocking pool; the builder is shared
/// read-only. Results come back in the order of `contexts`.
pub async fn resolve_targets(
    builder: Arc<GraphBuilder>,
    contexts: Vec<BuildContext>,
) -> Vec<Result<Resolution>> {
    let handles: Vec<_> = contexts
        .into_iter()
        .map(|ctx| {
            let builder = Arc::clone(&builder);
            tokio::task::spawn_blocking(move || builder.resolve(&ctx))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap_or_else(|e| {
            Err(ModgraphError::Other {
                message: format!("resolution task failed: {e}"),
            })
        }));
    }
    results
}
