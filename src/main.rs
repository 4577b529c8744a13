//! modgraph CLI entry point
//!
//! Parses arguments, runs the selected command and prints failures through
//! [`user_friendly_error`] before exiting with status 1.
//!
//! Commands:
//! - `resolve` - Resolve the module graph for a build context
//! - `validate` - Report every problem in modgraph.toml
//! - `tree` - Show a module's dependency tree
//! - `surface` - Show a module's public surface

use anyhow::Result;
use clap::Parser;
use modgraph_cli::cli;
use modgraph_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
