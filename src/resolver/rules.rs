//! Rule evaluation: turning one descriptor into a concrete dependency set.
//!
//! Evaluation is a pure function of the descriptor and the build context.
//! Entries are seeded from the public list, then the private list, then every
//! matching conditional rule in declaration order. When a name is contributed
//! more than once the more permissive visibility wins, so a later private
//! contribution never downgrades an earlier public one. The position of a name
//! is fixed by its first contribution.

use serde::Serialize;
use std::collections::HashMap;

use crate::context::BuildContext;
use crate::core::Visibility;
use crate::descriptor::ModuleDescriptor;

/// One entry of a resolved dependency set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    /// Dependency module name.
    pub name: String,
    /// Final visibility after merging all contributions.
    pub visibility: Visibility,
}

/// Ordered mapping from dependency name to visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedDependencies {
    entries: Vec<ResolvedDependency>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ResolvedDependencies {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` or upgrade its visibility.
    pub fn merge(&mut self, name: &str, visibility: Visibility) {
        match self.index.get(name) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                let merged = entry.visibility.merge(visibility);
                if merged != entry.visibility {
                    tracing::trace!(dependency = name, "upgraded to public");
                }
                entry.visibility = merged;
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(ResolvedDependency {
                    name: name.to_string(),
                    visibility,
                });
            }
        }
    }

    /// Visibility of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Visibility> {
        self.index.get(name).map(|&i| self.entries[i].visibility)
    }

    /// Whether `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in contribution order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.entries.iter()
    }

    /// Names with the given visibility, in contribution order.
    pub fn names_with(&self, visibility: Visibility) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(move |e| e.visibility == visibility).map(|e| e.name.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedDependencies {
    type Item = &'a ResolvedDependency;
    type IntoIter = std::slice::Iter<'a, ResolvedDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve `descriptor` against `ctx`.
///
/// Rules whose condition does not hold are skipped silently.
#[must_use]
pub fn evaluate(descriptor: &ModuleDescriptor, ctx: &BuildContext) -> ResolvedDependencies {
    let mut resolved = ResolvedDependencies::new();

    for name in descriptor.public_dependencies() {
        resolved.merge(name, Visibility::Public);
    }
    for name in descriptor.private_dependencies() {
        resolved.merge(name, Visibility::Private);
    }

    for rule in descriptor.rules() {
        if !rule.applies_to(ctx) {
            tracing::trace!(
                module = descriptor.name(),
                condition = %rule.condition(),
                "rule does not apply"
            );
            continue;
        }
        tracing::debug!(
            module = descriptor.name(),
            condition = %rule.condition(),
            visibility = %rule.visibility(),
            count = rule.dependencies().len(),
            "applying conditional rule"
        );
        for name in rule.dependencies() {
            resolved.merge(name, rule.visibility());
        }
    }

    resolved
}
