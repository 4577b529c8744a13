//! Manifest file parsing and descriptor loading.
//!
//! A project describes its modules in a `modgraph.toml` file. The manifest is
//! only a loader: it turns TOML into [`ModuleDescriptor`]s and registers them
//! with a [`GraphBuilder`] in file order. All dependency semantics live in the
//! resolver.
//!
//! # Format
//!
//! ```toml
//! # Optional defaults for the build context
//! [build]
//! target = "game"
//! platform = "linux"
//! configuration = "development"
//!
//! [[module]]
//! name = "GASP"
//! public = ["Core", "Engine"]
//! private = ["PoseSearch"]
//!
//! [[module.rule]]
//! when = { target = "editor" }
//! private = ["GameplayDebugger"]
//!
//! # Applied to the named module before registration
//! [[patch]]
//! module = "GASP"
//! private = ["Niagara"]
//! ```
//!
//! A rule may carry both a `public` and a `private` list; it becomes two
//! conditional rules with the same condition, public first.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::context::{Condition, ContextOptions};
use crate::core::{ModgraphError, Visibility};
use crate::descriptor::{ConditionalRule, DependencyPatch, ModuleDescriptor};
use crate::resolver::GraphBuilder;

/// Default manifest file name.
pub const MANIFEST_FILE_NAME: &str = "modgraph.toml";

/// Parsed contents of a `modgraph.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Context defaults from the `[build]` table.
    #[serde(default)]
    pub build: ContextOptions,

    /// Module declarations in file order.
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleEntry>,

    /// Patches applied before registration, in file order.
    #[serde(default, rename = "patch", skip_serializing_if = "Vec::is_empty")]
    pub patches: Vec<PatchEntry>,

    /// Directory containing the manifest, when loaded from disk.
    #[serde(skip)]
    pub manifest_dir: Option<PathBuf>,
}

/// One `[[module]]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    /// Module name.
    pub name: String,
    /// Public dependencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public: Vec<String>,
    /// Private dependencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,
    /// Conditional rules.
    #[serde(default, rename = "rule", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleEntry>,
}

/// One `[[module.rule]]` or `[[patch.rule]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    /// Condition that must hold for the lists to apply.
    pub when: Condition,
    /// Dependencies added publicly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public: Vec<String>,
    /// Dependencies added privately.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,
}

/// One `[[patch]]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchEntry {
    /// Name of the patched module.
    pub module: String,
    /// Appended public dependencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public: Vec<String>,
    /// Appended private dependencies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,
    /// Appended conditional rules.
    #[serde(default, rename = "rule", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleEntry>,
}

impl RuleEntry {
    fn to_rules(&self) -> Vec<ConditionalRule> {
        let mut rules = Vec::with_capacity(2);
        if !self.public.is_empty() {
            rules.push(ConditionalRule::new(self.when.clone(), Visibility::Public, &self.public));
        }
        if !self.private.is_empty() {
            rules.push(ConditionalRule::new(self.when.clone(), Visibility::Private, &self.private));
        }
        if rules.is_empty() {
            tracing::warn!(condition = %self.when, "rule lists no dependencies");
        }
        rules
    }
}

impl ModuleEntry {
    /// Build the descriptor this entry declares.
    pub fn to_descriptor(&self) -> crate::core::Result<ModuleDescriptor> {
        self.rules
            .iter()
            .flat_map(RuleEntry::to_rules)
            .fold(
                ModuleDescriptor::builder(self.name.clone())
                    .public(&self.public)
                    .private(&self.private),
                |builder, rule| builder.rule(rule),
            )
            .build()
    }
}

impl PatchEntry {
    fn to_patch(&self) -> DependencyPatch {
        DependencyPatch {
            public: self.public.clone(),
            private: self.private.clone(),
            rules: self.rules.iter().flat_map(RuleEntry::to_rules).collect(),
        }
    }
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// - the file cannot be read
    /// - the content is not valid TOML or has unknown keys
    ///   ([`ModgraphError::ManifestParseError`])
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let mut manifest = Self::parse(&content, &path.display().to_string())?;
        manifest.manifest_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!(
            path = %path.display(),
            modules = manifest.modules.len(),
            patches = manifest.patches.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    fn parse(content: &str, file: &str) -> crate::core::Result<Self> {
        toml::from_str(content).map_err(|e| ModgraphError::ManifestParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }

    /// Context defaults declared in `[build]`.
    #[must_use]
    pub const fn build_options(&self) -> ContextOptions {
        self.build
    }

    /// Module names in file order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }

    /// Build every descriptor and apply the patches.
    ///
    /// Descriptors come back in file order. A patch naming an undeclared module
    /// fails with [`ModgraphError::UnknownModule`].
    pub fn descriptors(&self) -> crate::core::Result<Vec<ModuleDescriptor>> {
        let mut descriptors =
            self.modules.iter().map(ModuleEntry::to_descriptor).collect::<crate::core::Result<Vec<_>>>()?;

        for patch in &self.patches {
            let target = descriptors.iter_mut().find(|d| d.name() == patch.module).ok_or_else(|| {
                ModgraphError::UnknownModule {
                    name: patch.module.clone(),
                }
            })?;
            let patch = patch.to_patch();
            if patch.is_empty() {
                continue;
            }
            target.extend(patch)?;
        }

        Ok(descriptors)
    }

    /// Register every declared module with a fresh [`GraphBuilder`].
    pub fn into_builder(&self) -> Result<GraphBuilder> {
        let mut builder = GraphBuilder::new();
        builder
            .register_all(self.descriptors().context("Invalid module declaration in manifest")?)
            .context("Failed to register manifest modules")?;
        Ok(builder)
    }
}

impl FromStr for Manifest {
    type Err = ModgraphError;

    fn from_str(s: &str) -> crate::core::Result<Self> {
        Self::parse(s, "<string>")
    }
}

/// Locate `modgraph.toml` starting at the current directory.
pub fn find_manifest() -> crate::core::Result<PathBuf> {
    find_manifest_from(std::env::current_dir()?)
}

/// Use `explicit_path` when given, otherwise search from the current directory.
///
/// An explicit path that does not exist is [`ModgraphError::ManifestNotFound`].
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> crate::core::Result<PathBuf> {
    match explicit_path {
        Some(path) if path.exists() => Ok(path),
        Some(_) => Err(ModgraphError::ManifestNotFound),
        None => find_manifest(),
    }
}

/// Walk up from `current` until a directory containing `modgraph.toml` is found.
pub fn find_manifest_from(mut current: PathBuf) -> crate::core::Result<PathBuf> {
    loop {
        let candidate = current.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ModgraphError::ManifestNotFound);
        }
    }
}
