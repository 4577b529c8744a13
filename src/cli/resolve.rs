//! Resolve every module of the project for one or all target kinds.
//!
//! # Examples
//!
//! ```bash
//! modgraph resolve                          # context from [build] and defaults
//! modgraph resolve --target editor
//! modgraph resolve --all-targets --format json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use super::common::{ContextArgs, OutputFormat, Project, join_or_dash};
use crate::context::TargetKind;
use crate::core::Visibility;
use crate::resolver::{Resolution, resolve_targets};

/// Command to resolve the dependency graph.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Resolve for every target kind, keeping platform and configuration.
    ///
    /// Any `--target` or `MODGRAPH_TARGET` value is ignored.
    #[arg(long)]
    pub all_targets: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Execute against an explicit or discovered manifest.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let project = Project::load(manifest_path).await?;
        let ctx = self.context.resolve_against(&project.manifest);

        let resolutions = if self.all_targets {
            if let Some(target) = self.context.target {
                tracing::debug!(requested = %target, "ignoring target, resolving every target kind");
            }
            let contexts: Vec<_> = TargetKind::ALL.iter().map(|&t| ctx.with_target(t)).collect();
            let results = resolve_targets(Arc::new(project.builder), contexts.clone()).await;
            contexts
                .iter()
                .zip(results)
                .map(|(ctx, result)| result.with_context(|| format!("Resolution failed for {ctx}")))
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![project.builder.resolve(&ctx).with_context(|| format!("Resolution failed for {ctx}"))?]
        };

        match self.format {
            OutputFormat::Json if self.all_targets => {
                println!("{}", serde_json::to_string_pretty(&resolutions)?);
            }
            OutputFormat::Json => {
                for resolution in &resolutions {
                    println!("{}", serde_json::to_string_pretty(resolution)?);
                }
            }
            OutputFormat::Text => {
                let blocks: Vec<_> = resolutions.iter().map(render_text).collect();
                print!("{}", blocks.join("\n"));
            }
        }
        Ok(())
    }
}

/// Text rendering of one resolution.
pub fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Context:".bold(), resolution.context());

    for module in resolution.graph().modules() {
        let _ = writeln!(out, "{}", module.cyan().bold());
        if let Some(resolved) = resolution.resolved(module) {
            let public: Vec<_> = resolved.names_with(Visibility::Public).collect();
            let private: Vec<_> = resolved.names_with(Visibility::Private).collect();
            let _ = writeln!(out, "  public:  {}", join_or_dash(&public));
            let _ = writeln!(out, "  private: {}", join_or_dash(&private));
        }
        let surface = resolution.public_surface(module).unwrap_or_default();
        let _ = writeln!(out, "  surface: {}", join_or_dash(surface));
    }

    let _ = writeln!(out, "{} {}", "Build order:".bold(), resolution.build_order().join(" → "));
    out
}
