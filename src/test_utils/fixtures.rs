//! Sample manifests and descriptor sets.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{Condition, TargetKind};
use crate::descriptor::{ConditionalRule, ModuleDescriptor};
use crate::manifest::MANIFEST_FILE_NAME;
use crate::resolver::GraphBuilder;

/// Gameplay animation sample: `GASP` needs `GameplayDebugger` in editor builds only.
pub const GASP_MANIFEST: &str = r#"
[[module]]
name = "Core"

[[module]]
name = "Engine"
public = ["Core"]

[[module]]
name = "PoseSearch"
public = ["Engine"]

[[module]]
name = "GameplayDebugger"
private = ["Engine"]

[[module]]
name = "GASP"
public = ["Core", "Engine"]
private = ["PoseSearch"]

[[module.rule]]
when = { target = "editor" }
private = ["GameplayDebugger"]
"#;

/// The [`GASP_MANIFEST`] modules, registered in the same order.
///
/// # Panics
///
/// Never for the fixed fixture; descriptors are known valid.
#[must_use]
pub fn gasp_builder() -> GraphBuilder {
    let module = |name: &str, public: &[&str], private: &[&str]| {
        ModuleDescriptor::builder(name)
            .public(public.iter().copied())
            .private(private.iter().copied())
    };

    let mut builder = GraphBuilder::new();
    builder
        .register_all(
            [
                module("Core", &[], &[]),
                module("Engine", &["Core"], &[]),
                module("PoseSearch", &["Engine"], &[]),
                module("GameplayDebugger", &[], &["Engine"]),
                module("GASP", &["Core", "Engine"], &["PoseSearch"]).rule(ConditionalRule::private(
                    Condition::target(TargetKind::Editor),
                    ["GameplayDebugger"],
                )),
            ]
            .into_iter()
            .map(|b| b.build().expect("fixture descriptor is valid")),
        )
        .expect("fixture modules are unique");
    builder
}

/// Test fixture for creating sample modgraph.toml files
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// The gameplay animation sample.
    pub fn gasp() -> Self {
        Self {
            name: "gasp".to_string(),
            content: GASP_MANIFEST.trim().to_string(),
        }
    }

    /// Two modules depending publicly on each other.
    pub fn cyclic() -> Self {
        Self {
            name: "cyclic".to_string(),
            content: r#"
[[module]]
name = "Core"

[[module]]
name = "Render"
public = ["Core", "Physics"]

[[module]]
name = "Physics"
private = ["Render"]
"#
            .trim()
            .to_string(),
        }
    }

    /// A module that references an undeclared one, but only for server builds.
    pub fn server_only_unknown() -> Self {
        Self {
            name: "server_only_unknown".to_string(),
            content: r#"
[[module]]
name = "Core"

[[module]]
name = "Net"
public = ["Core"]

[[module.rule]]
when = { target = "server" }
private = ["Replication", "Sockets"]
"#
            .trim()
            .to_string(),
        }
    }

    /// A rule whose condition cannot hold for any context.
    pub fn unreachable_rule() -> Self {
        Self {
            name: "unreachable_rule".to_string(),
            content: r#"
[[module]]
name = "Core"

[[module]]
name = "Tools"

[[module.rule]]
when = { all = [{ target = "editor" }, { target = "game" }] }
private = ["Core"]
"#
            .trim()
            .to_string(),
        }
    }

    /// Manifest with invalid syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[[module]
name = "Core"
public = ["Engine"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write `modgraph.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&manifest_path, &self.content)
            .with_context(|| format!("Failed to write {} fixture", self.name))?;
        Ok(manifest_path)
    }
}
