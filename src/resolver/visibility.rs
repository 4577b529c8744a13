//! Public surface propagation.
//!
//! A module's public surface is everything a consumer gains by depending on it:
//! the closure of public edges starting at the module. Private edges stop
//! propagation immediately, so a private dependency never shows up in any
//! surface, not even the declaring module's own.

use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::Visibility;
use crate::resolver::DependencyGraph;

/// Public surface of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSurface {
    /// Module name.
    pub module: String,
    /// Modules visible through it, in breadth-first discovery order.
    pub surface: Vec<String>,
}

/// Public surfaces of every module in a graph, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisibilityMap {
    surfaces: Vec<ModuleSurface>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl VisibilityMap {
    /// Surface of `module`, if it is in the graph.
    #[must_use]
    pub fn public_surface(&self, module: &str) -> Option<&[String]> {
        self.index.get(module).map(|&i| self.surfaces[i].surface.as_slice())
    }

    /// Surfaces in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleSurface> {
        self.surfaces.iter()
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Compute the public surface of every module.
///
/// The graph must be acyclic; a graph coming out of the builder always is.
/// Traversal only follows public edges and records each module the first
/// time it is discovered.
#[must_use]
pub fn propagate(graph: &DependencyGraph) -> VisibilityMap {
    let mut map = VisibilityMap::default();

    for module in graph.modules() {
        let surface = public_closure(graph, module);
        tracing::trace!(module, size = surface.len(), "computed public surface");
        map.index.insert(module.to_string(), map.surfaces.len());
        map.surfaces.push(ModuleSurface {
            module: module.to_string(),
            surface,
        });
    }

    map
}

fn public_closure(graph: &DependencyGraph, module: &str) -> Vec<String> {
    let mut order = Vec::new();
    let Some(start) = graph.index_of(module) else {
        return order;
    };

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for edge in graph.ordered_edges(current) {
            if *edge.weight() != Visibility::Public {
                continue;
            }
            let target = edge.target();
            if seen.insert(target) {
                order.push(graph.name_of(target).to_string());
                queue.push_back(target);
            }
        }
    }

    order
}
