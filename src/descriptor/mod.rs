//! Module descriptors.
//!
//! A [`ModuleDescriptor`] is the authored record for one module: the modules it
//! depends on publicly, the ones it depends on privately, and the conditional
//! rules that add dependencies only for some builds. Descriptors are validated
//! when they are built and are read-only afterwards, apart from
//! [`ModuleDescriptor::extend`] which is only allowed until the descriptor is
//! registered with a [`GraphBuilder`](crate::resolver::GraphBuilder).
//!
//! # Example
//!
//! ```rust
//! use modgraph_cli::context::{Condition, TargetKind};
//! use modgraph_cli::descriptor::{ConditionalRule, ModuleDescriptor};
//!
//! let gasp = ModuleDescriptor::builder("GASP")
//!     .public(["Core", "Engine"])
//!     .private(["PoseSearch"])
//!     .rule(ConditionalRule::private(
//!         Condition::target(TargetKind::Editor),
//!         ["GameplayDebugger"],
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(gasp.public_dependencies(), ["Core", "Engine"]);
//! ```

mod rule;

pub use rule::ConditionalRule;

use serde::Serialize;
use std::collections::HashSet;

use crate::core::{ModgraphError, Result, Visibility};

/// Immutable dependency declaration for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    name: String,
    public: Vec<String>,
    private: Vec<String>,
    rules: Vec<ConditionalRule>,
    #[serde(skip)]
    sealed: bool,
}

impl ModuleDescriptor {
    /// Start declaring a module.
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            public: Vec::new(),
            private: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public dependencies in declaration order.
    #[must_use]
    pub fn public_dependencies(&self) -> &[String] {
        &self.public
    }

    /// Private dependencies in declaration order.
    #[must_use]
    pub fn private_dependencies(&self) -> &[String] {
        &self.private
    }

    /// Conditional rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[ConditionalRule] {
        &self.rules
    }

    /// Whether a graph builder has taken ownership of this descriptor.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Append the entries of `patch`.
    ///
    /// The combined descriptor is validated as a whole and the change is only
    /// applied if it passes. Sealed descriptors reject every patch with
    /// [`ModgraphError::MutationAfterRegistration`], including clones handed
    /// out by a graph builder.
    pub fn extend(&mut self, patch: DependencyPatch) -> Result<()> {
        if self.sealed {
            return Err(ModgraphError::MutationAfterRegistration {
                module: self.name.clone(),
            });
        }

        let mut candidate = self.clone();
        candidate.public.extend(patch.public);
        candidate.private.extend(patch.private);
        candidate.rules.extend(patch.rules);
        candidate.validate()?;

        tracing::debug!(module = %self.name, "applied dependency patch");
        *self = candidate;
        Ok(())
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    fn validate(&self) -> Result<()> {
        check_name(&self.name, &self.name)?;

        check_list(&self.name, &self.public, Visibility::Public.to_string())?;
        check_list(&self.name, &self.private, Visibility::Private.to_string())?;

        let public: HashSet<&str> = self.public.iter().map(String::as_str).collect();
        if let Some(dependency) = self.private.iter().find(|dep| public.contains(dep.as_str())) {
            return Err(ModgraphError::ConflictingVisibility {
                module: self.name.clone(),
                dependency: dependency.clone(),
            });
        }

        for (i, rule) in self.rules.iter().enumerate() {
            let list = format!("rule #{} ({})", i + 1, rule.condition());
            check_list(&self.name, rule.dependencies(), list)?;
        }

        Ok(())
    }
}

/// Builder returned by [`ModuleDescriptor::builder`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    public: Vec<String>,
    private: Vec<String>,
    rules: Vec<ConditionalRule>,
}

impl DescriptorBuilder {
    /// Add public dependencies.
    #[must_use]
    pub fn public<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add private dependencies.
    #[must_use]
    pub fn private<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a conditional rule.
    #[must_use]
    pub fn rule(mut self, rule: ConditionalRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate and produce the descriptor.
    pub fn build(self) -> Result<ModuleDescriptor> {
        let descriptor = ModuleDescriptor {
            name: self.name,
            public: self.public,
            private: self.private,
            rules: self.rules,
            sealed: false,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Extra dependency entries appended to a descriptor before registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPatch {
    /// Appended public dependencies.
    pub public: Vec<String>,
    /// Appended private dependencies.
    pub private: Vec<String>,
    /// Appended conditional rules.
    pub rules: Vec<ConditionalRule>,
}

impl DependencyPatch {
    /// Whether the patch adds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty() && self.rules.is_empty()
    }
}

fn check_name(module: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ModgraphError::InvalidDependency {
            module: module.to_string(),
            reason: "names must be non-empty".to_string(),
        });
    }
    Ok(())
}

fn check_list(module: &str, names: &[String], list: String) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        check_name(module, name)?;
        if name == module {
            return Err(ModgraphError::SelfDependency {
                module: module.to_string(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ModgraphError::DuplicateDependency {
                module: module.to_string(),
                dependency: name.clone(),
                list,
            });
        }
    }
    Ok(())
}
