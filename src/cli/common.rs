//! Shared argument groups and project loading for the subcommands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::context::{BuildConfiguration, BuildContext, ContextOptions, Platform, TargetKind};
use crate::manifest::{Manifest, find_manifest_with_optional};
use crate::resolver::GraphBuilder;

/// Output format shared by all subcommands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// Pretty-printed JSON for tooling.
    Json,
}

/// Build context selection.
///
/// Flags win over the `MODGRAPH_*` environment variables, which win over the
/// manifest's `[build]` table.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Target kind (game, editor, server, client, program)
    #[arg(long, env = "MODGRAPH_TARGET")]
    pub target: Option<TargetKind>,

    #[command(flatten)]
    pub base: BaseContextArgs,
}

/// Platform and configuration only, for commands that check every target kind.
#[derive(Args, Debug, Clone, Default)]
pub struct BaseContextArgs {
    /// Target platform (win64, mac, linux, android, ios)
    #[arg(long, env = "MODGRAPH_PLATFORM")]
    pub platform: Option<Platform>,

    /// Build configuration (debug, debuggame, development, test, shipping)
    #[arg(long, env = "MODGRAPH_CONFIGURATION")]
    pub configuration: Option<BuildConfiguration>,
}

impl ContextArgs {
    /// The layer these arguments contribute.
    #[must_use]
    pub const fn options(&self) -> ContextOptions {
        ContextOptions {
            target: self.target,
            ..self.base.options()
        }
    }

    /// Final context with the manifest's `[build]` table underneath.
    #[must_use]
    pub fn resolve_against(&self, manifest: &Manifest) -> BuildContext {
        self.options().layered_over(&manifest.build_options()).into_context()
    }
}

impl BaseContextArgs {
    /// The layer these arguments contribute; the target is left to lower layers.
    #[must_use]
    pub const fn options(&self) -> ContextOptions {
        ContextOptions {
            target: None,
            platform: self.platform,
            configuration: self.configuration,
        }
    }

    /// Final context with the manifest's `[build]` table underneath.
    #[must_use]
    pub fn resolve_against(&self, manifest: &Manifest) -> BuildContext {
        self.options().layered_over(&manifest.build_options()).into_context()
    }
}

/// A loaded manifest together with its registered modules.
#[derive(Debug)]
pub struct Project {
    pub path: PathBuf,
    pub manifest: Manifest,
    pub builder: GraphBuilder,
}

impl Project {
    /// Locate, parse and register the project's modules.
    pub async fn load(manifest_path: Option<PathBuf>) -> Result<Self> {
        let path = find_manifest_with_optional(manifest_path)
            .context("No modgraph.toml found in current directory or any parent directory")?;
        let manifest = Manifest::load(&path).await?;
        let builder = manifest.into_builder()?;
        Ok(Self {
            path,
            manifest,
            builder,
        })
    }
}

/// Join names for display, `-` when empty.
pub(crate) fn join_or_dash<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}
