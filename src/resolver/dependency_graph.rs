//! Dependency graph for resolved modules.
//!
//! This module provides the graph data structure produced by the
//! [`GraphBuilder`](super::GraphBuilder): one node per registered module and one
//! visibility-tagged edge per resolved dependency. It also holds the graph
//! algorithms the rest of the resolver needs: cycle detection, build ordering,
//! reachability and tree rendering.
//!
//! Every traversal visits modules in registration order and outgoing edges in
//! emission order, so two graphs built from the same inputs produce identical
//! results, diagnostics included.

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::core::{ModgraphError, Result, Visibility};
use crate::resolver::rules::ResolvedDependencies;

/// One resolved dependency relationship: `from` depends on `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyEdge {
    /// Declaring module.
    pub from: String,
    /// Dependency module.
    pub to: String,
    /// Resolved visibility.
    pub visibility: Visibility,
}

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed graph of modules with visibility-tagged edges.
///
/// Built once per resolution pass and never modified afterwards; callers only
/// get shared references to it.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph; node weights are module names.
    graph: DiGraph<String, Visibility>,
    /// Map from module names to their graph indices.
    node_map: HashMap<String, NodeIndex>,
    /// Resolved dependency set of each module, indexed like the nodes.
    resolved: Vec<ResolvedDependencies>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a module node with its resolved dependency set.
    pub(crate) fn add_module(&mut self, name: &str, resolved: ResolvedDependencies) -> NodeIndex {
        let index = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), index);
        self.resolved.push(resolved);
        index
    }

    /// Add an edge between two existing modules.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, visibility: Visibility) {
        self.graph.add_edge(from, to, visibility);
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub(crate) fn name_of(&self, index: NodeIndex) -> &str {
        &self.graph[index]
    }

    /// Outgoing edges of `index` in emission order.
    ///
    /// petgraph walks adjacency lists newest first, so the edges are sorted by
    /// index to recover insertion order.
    pub(crate) fn ordered_edges(&self, index: NodeIndex) -> Vec<EdgeReference<'_, Visibility>> {
        let mut edges: Vec<_> = self.graph.edges(index).collect();
        edges.sort_by_key(|e| e.id());
        edges
    }

    /// Whether a module with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Module names in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// All edges in emission order.
    #[must_use]
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.graph
            .edge_references()
            .map(|e| DependencyEdge {
                from: self.graph[e.source()].clone(),
                to: self.graph[e.target()].clone(),
                visibility: *e.weight(),
            })
            .collect()
    }

    /// Resolved dependency set of a module.
    #[must_use]
    pub fn resolved(&self, name: &str) -> Option<&ResolvedDependencies> {
        self.index_of(name).map(|idx| &self.resolved[idx.index()])
    }

    /// Direct dependencies of a module in emission order.
    #[must_use]
    pub fn direct_dependencies(&self, name: &str) -> Vec<(&str, Visibility)> {
        match self.index_of(name) {
            Some(idx) => self
                .ordered_edges(idx)
                .into_iter()
                .map(|e| (self.graph[e.target()].as_str(), *e.weight()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Modules with a direct edge into `name`, in emission order.
    #[must_use]
    pub fn dependents(&self, name: &str) -> Vec<(&str, Visibility)> {
        let Some(idx) = self.index_of(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Incoming).collect();
        edges.sort_by_key(|e| e.id());
        edges.into_iter().map(|e| (self.graph[e.source()].as_str(), *e.weight())).collect()
    }

    /// Every module reachable from `name` over edges of any visibility.
    ///
    /// Ordered by first discovery in a breadth-first traversal.
    #[must_use]
    pub fn transitive_dependencies(&self, name: &str) -> Vec<String> {
        let mut order = Vec::new();
        let Some(start) = self.index_of(name) else {
            return order;
        };

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for edge in self.ordered_edges(current) {
                let target = edge.target();
                if seen.insert(target) {
                    order.push(self.graph[target].clone());
                    queue.push_back(target);
                }
            }
        }
        order
    }

    /// Detect cycles in the dependency graph using DFS with colors.
    ///
    /// Returns [`ModgraphError::DependencyCycle`] carrying the first cycle
    /// found; the path starts and ends with the same module.
    pub fn detect_cycles(&self) -> Result<()> {
        let mut colors = vec![Color::White; self.graph.node_count()];
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if colors[node.index()] == Color::White {
                if let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path) {
                    return Err(ModgraphError::DependencyCycle {
                        cycle: cycle.into_iter().map(|idx| self.graph[idx].clone()).collect(),
                    });
                }
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, None otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut [Color],
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors[node.index()] = Color::Gray;
        path.push(node);

        for edge in self.ordered_edges(node) {
            let neighbor = edge.target();
            match colors[neighbor.index()] {
                Color::Gray => {
                    // The gray node is on the current path; the cycle is the suffix from it
                    let start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(neighbor);
                    return Some(cycle);
                }
                Color::White => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }

        path.pop();
        colors[node.index()] = Color::Black;
        None
    }

    /// Get the order in which modules can be built.
    ///
    /// Every module appears after all of its dependencies. Among modules that
    /// are ready at the same time the one registered first comes first.
    pub fn build_order(&self) -> Result<Vec<String>> {
        self.detect_cycles()?;

        let mut pending: Vec<usize> =
            self.graph.node_indices().map(|idx| self.graph.edges(idx).count()).collect();
        let mut ready: BTreeSet<NodeIndex> =
            self.graph.node_indices().filter(|idx| pending[idx.index()] == 0).collect();
        let mut order = Vec::with_capacity(self.graph.node_count());

        while let Some(next) = ready.pop_first() {
            order.push(self.graph[next].clone());
            for edge in self.graph.edges_directed(next, Direction::Incoming) {
                let dependent = edge.source();
                pending[dependent.index()] -= 1;
                if pending[dependent.index()] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        Ok(order)
    }

    /// Check if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Get the total number of modules in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the total number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Build a human-readable dependency tree rooted at `root`.
    ///
    /// Private edges are marked, modules already expanded elsewhere in the
    /// tree are marked `(*)` and not expanded again. `max_depth` limits how
    /// many levels below the root are shown.
    #[must_use]
    pub fn to_tree_string(&self, root: &str, max_depth: Option<usize>) -> String {
        let mut result = String::new();
        let Some(root_idx) = self.index_of(root) else {
            return result;
        };

        result.push_str(root);
        result.push('\n');
        let mut visited = HashSet::from([root_idx]);
        self.build_tree_string(root_idx, &mut result, "", 1, max_depth, &mut visited);
        result
    }

    fn build_tree_string(
        &self,
        node: NodeIndex,
        result: &mut String,
        prefix: &str,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        if max_depth.is_some_and(|max| depth > max) {
            return;
        }

        let edges = self.ordered_edges(node);
        for (i, edge) in edges.iter().enumerate() {
            let is_last = i == edges.len() - 1;
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };
            let target = edge.target();
            let marker = match edge.weight() {
                Visibility::Public => "",
                Visibility::Private => " [private]",
            };

            if !visited.insert(target) {
                result.push_str(&format!(
                    "{prefix}{connector}{}{marker} (*)\n",
                    self.graph[target]
                ));
                continue;
            }

            result.push_str(&format!("{prefix}{connector}{}{marker}\n", self.graph[target]));
            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            self.build_tree_string(target, result, &child_prefix, depth + 1, max_depth, visited);
        }
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct GraphView<'a> {
            modules: Vec<&'a str>,
            edges: Vec<DependencyEdge>,
        }

        GraphView {
            modules: self.modules().collect(),
            edges: self.edges(),
        }
        .serialize(serializer)
    }
}
