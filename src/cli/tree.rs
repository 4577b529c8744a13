//! Display the dependency tree of one module.
//!
//! Private edges are marked `[private]`; a module already shown elsewhere in
//! the tree is marked `(*)` and not expanded again.
//!
//! # Examples
//!
//! ```bash
//! modgraph tree GASP
//! modgraph tree GASP --target editor --depth 1
//! ```
//!
//! ```text
//! GASP
//! ├── Core
//! ├── Engine
//! │   └── Core (*)
//! ├── PoseSearch [private]
//! │   └── Engine (*)
//! └── GameplayDebugger [private]
//!     └── Engine [private] (*)
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{ContextArgs, OutputFormat, Project};
use crate::core::ModgraphError;

/// Command to display a module's dependency tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Module at the root of the tree
    pub module: String,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    pub depth: Option<usize>,

    /// Output format; JSON prints the whole graph
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TreeCommand {
    /// Execute against an explicit or discovered manifest.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let project = Project::load(manifest_path).await?;
        let ctx = self.context.resolve_against(&project.manifest);
        let graph = project.builder.build(&ctx).with_context(|| format!("Resolution failed for {ctx}"))?;

        if !graph.contains(&self.module) {
            return Err(ModgraphError::UnknownModule {
                name: self.module,
            }
            .into());
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
            OutputFormat::Text => {
                tracing::debug!(module = %self.module, context = %ctx, "rendering tree");
                println!("{} {}", "Context:".bold(), ctx);
                print!("{}", graph.to_tree_string(&self.module, self.depth));
            }
        }
        Ok(())
    }
}
