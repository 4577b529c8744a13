//! Graph builder: registration of descriptors and construction of the graph.
//!
//! The builder owns every registered [`ModuleDescriptor`] and seals it on
//! registration. Building resolves each module against a [`BuildContext`],
//! emits one edge per resolved dependency (declaration order within a module,
//! then registration order), and validates the result. Building is
//! all-or-nothing: either a fully valid graph comes back or an error does.

use std::collections::HashMap;

use crate::context::BuildContext;
use crate::core::{ModgraphError, Result};
use crate::descriptor::ModuleDescriptor;
use crate::resolver::rules::{ResolvedDependencies, evaluate};
use crate::resolver::{DependencyEdge, DependencyGraph, Resolution};

/// Collects descriptors and builds dependency graphs from them.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    descriptors: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// Names must be unique; the descriptor is sealed and any later attempt
    /// to extend it (or a clone of it) fails.
    pub fn register(&mut self, mut descriptor: ModuleDescriptor) -> Result<()> {
        if self.index.contains_key(descriptor.name()) {
            return Err(ModgraphError::DuplicateModule {
                name: descriptor.name().to_string(),
            });
        }

        descriptor.seal();
        tracing::debug!(module = descriptor.name(), "registered module");
        self.index.insert(descriptor.name().to_string(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Register several descriptors in order, stopping at the first error.
    pub fn register_all<I>(&mut self, descriptors: I) -> Result<()>
    where
        I: IntoIterator<Item = ModuleDescriptor>,
    {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// Registered descriptor by name.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    /// Registered descriptors in registration order.
    #[must_use]
    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.descriptors
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Resolve every module and build the validated graph.
    pub fn build(&self, ctx: &BuildContext) -> Result<DependencyGraph> {
        let (resolved, edges) = self.emit(ctx);

        if let Some(edge) = edges.iter().find(|e| !self.index.contains_key(&e.to)) {
            return Err(ModgraphError::UnknownDependency {
                module: edge.from.clone(),
                dependency: edge.to.clone(),
            });
        }

        let graph = self.assemble(resolved, &edges);
        graph.detect_cycles()?;

        tracing::debug!(
            context = %ctx,
            modules = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        Ok(graph)
    }

    /// Build the graph and compute public surfaces and build order.
    pub fn resolve(&self, ctx: &BuildContext) -> Result<Resolution> {
        let graph = self.build(ctx)?;
        Resolution::new(*ctx, graph)
    }

    /// Run the same checks as [`build`](Self::build) but report every problem.
    ///
    /// All unknown dependencies are listed in emission order. Cycle detection
    /// only runs once every reference is known, and reports one cycle.
    #[must_use]
    pub fn diagnose(&self, ctx: &BuildContext) -> Vec<ModgraphError> {
        let (resolved, edges) = self.emit(ctx);

        let unknown: Vec<ModgraphError> = edges
            .iter()
            .filter(|e| !self.index.contains_key(&e.to))
            .map(|e| ModgraphError::UnknownDependency {
                module: e.from.clone(),
                dependency: e.to.clone(),
            })
            .collect();
        if !unknown.is_empty() {
            return unknown;
        }

        match self.assemble(resolved, &edges).detect_cycles() {
            Ok(()) => Vec::new(),
            Err(e) => vec![e],
        }
    }

    /// Evaluate every descriptor and list the edges it contributes.
    fn emit(&self, ctx: &BuildContext) -> (Vec<ResolvedDependencies>, Vec<DependencyEdge>) {
        let mut all_resolved = Vec::with_capacity(self.descriptors.len());
        let mut edges = Vec::new();

        for descriptor in &self.descriptors {
            let resolved = evaluate(descriptor, ctx);
            for dependency in &resolved {
                tracing::trace!(
                    module = descriptor.name(),
                    dependency = %dependency.name,
                    visibility = %dependency.visibility,
                    "emit edge"
                );
                edges.push(DependencyEdge {
                    from: descriptor.name().to_string(),
                    to: dependency.name.clone(),
                    visibility: dependency.visibility,
                });
            }
            all_resolved.push(resolved);
        }

        (all_resolved, edges)
    }

    /// Turn emitted edges into a graph. Every edge target must be registered.
    fn assemble(
        &self,
        resolved: Vec<ResolvedDependencies>,
        edges: &[DependencyEdge],
    ) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (descriptor, resolved) in self.descriptors.iter().zip(resolved) {
            graph.add_module(descriptor.name(), resolved);
        }
        for edge in edges {
            if let (Some(from), Some(to)) = (graph.index_of(&edge.from), graph.index_of(&edge.to)) {
                graph.add_edge(from, to, edge.visibility);
            }
        }
        graph
    }
}
