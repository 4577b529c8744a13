//! Command-line interface for modgraph.
//!
//! Every subcommand loads `modgraph.toml` (found by walking up from the current
//! directory unless `--manifest-path` is given), resolves the build context and
//! prints its result as text or JSON.
//!
//! # Commands
//!
//! - `resolve`: resolved dependency sets, public surfaces and build order
//! - `validate`: every problem the manifest has, for all target kinds
//! - `tree`: dependency tree of one module
//! - `surface`: what a module exposes and what its implementation can see
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--manifest-path` - Use a specific manifest file
//! - `--no-color` - Disable colored output
//!
//! `RUST_LOG` overrides the level chosen by `--verbose`/`--quiet`.
//!
//! # Examples
//!
//! ```bash
//! modgraph resolve --target editor
//! modgraph resolve --all-targets --format json
//! modgraph validate --strict
//! modgraph tree GASP --depth 2
//! MODGRAPH_TARGET=editor modgraph surface GASP
//! ```

mod common;
pub mod resolve;
pub mod surface;
pub mod tree;
pub mod validate;

pub use common::{BaseContextArgs, ContextArgs, OutputFormat, Project};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Main CLI structure for modgraph.
#[derive(Parser, Debug)]
#[command(
    name = "modgraph",
    about = "Resolve module dependency graphs for a build context",
    version,
    author,
    long_about = "modgraph reads module descriptors from modgraph.toml, evaluates their conditional \
                  rules for a build context and reports the resulting dependency graph, public \
                  surfaces and build order."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the manifest file (modgraph.toml).
    ///
    /// By default the manifest is searched for in the current directory and
    /// its parents.
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve every module for a build context.
    ///
    /// See [`resolve::ResolveCommand`] for detailed options and behavior.
    Resolve(resolve::ResolveCommand),

    /// Check the manifest and report every problem.
    ///
    /// See [`validate::ValidateCommand`] for detailed options and behavior.
    Validate(validate::ValidateCommand),

    /// Show the dependency tree of a module.
    ///
    /// See [`tree::TreeCommand`] for detailed options and behavior.
    Tree(tree::TreeCommand),

    /// Show a module's public surface and accessible set.
    ///
    /// See [`surface::SurfaceCommand`] for detailed options and behavior.
    Surface(surface::SurfaceCommand),
}

impl Cli {
    /// Set up logging and colors, then run the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();
        if self.no_color {
            colored::control::set_override(false);
        }

        match self.command {
            Commands::Resolve(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Validate(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Tree(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Surface(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
        }
    }

    /// Log level implied by the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level())
        };

        // Logs go to stderr so JSON output on stdout stays parseable
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(!self.no_color)
            .try_init();
    }
}
