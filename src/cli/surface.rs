//! Show what a module exposes to its dependents and what it can see itself.
//!
//! # Examples
//!
//! ```bash
//! modgraph surface GASP
//! modgraph surface GASP --target editor --format json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{ContextArgs, OutputFormat, Project, join_or_dash};
use crate::context::BuildContext;
use crate::core::ModgraphError;
use crate::resolver::Resolution;

/// Command to display a module's public surface.
#[derive(Args, Debug)]
pub struct SurfaceCommand {
    /// Module to inspect
    pub module: String,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Visibility summary of one module.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SurfaceReport {
    pub module: String,
    pub context: BuildContext,
    /// Modules a dependent of `module` gains access to.
    pub public_surface: Vec<String>,
    /// Modules `module`'s own implementation can see.
    pub accessible: Vec<String>,
}

impl SurfaceReport {
    /// Summarise `module`; fails if it is not part of the resolution.
    pub fn from_resolution(resolution: &Resolution, module: &str) -> Result<Self, ModgraphError> {
        let unknown = || ModgraphError::UnknownModule {
            name: module.to_string(),
        };
        Ok(Self {
            module: module.to_string(),
            context: *resolution.context(),
            public_surface: resolution.public_surface(module).ok_or_else(unknown)?.to_vec(),
            accessible: resolution.accessible_from(module).ok_or_else(unknown)?,
        })
    }
}

impl SurfaceCommand {
    /// Execute against an explicit or discovered manifest.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let project = Project::load(manifest_path).await?;
        let ctx = self.context.resolve_against(&project.manifest);
        let resolution =
            project.builder.resolve(&ctx).with_context(|| format!("Resolution failed for {ctx}"))?;
        let report = SurfaceReport::from_resolution(&resolution, &self.module)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!("{} {}", "Context:".bold(), report.context);
                println!("{}", report.module.cyan().bold());
                println!("  public surface: {}", join_or_dash(&report.public_surface));
                println!("  accessible:     {}", join_or_dash(&report.accessible));
            }
        }
        Ok(())
    }
}
