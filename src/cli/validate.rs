//! Validate a project manifest.
//!
//! Validation loads the manifest, builds every descriptor, and then runs the
//! resolver's diagnostics for each target kind (platform and configuration
//! come from the usual context layering). Problems found for several target
//! kinds are reported once, listing the affected kinds.
//!
//! Rules whose condition can never hold are warnings; `--strict` turns them
//! into failures.
//!
//! # Examples
//!
//! ```bash
//! modgraph validate
//! modgraph validate --strict --format json
//! ```

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{BaseContextArgs, OutputFormat, Project};
use crate::context::{BuildContext, TargetKind};
use crate::resolver::GraphBuilder;

/// Command to validate the manifest and its module graph.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Platform and configuration; every target kind is checked.
    #[command(flatten)]
    pub context: BaseContextArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Outcome of a validation run.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// True when there are no errors (and no warnings in strict mode).
    pub valid: bool,
    /// Manifest that was checked, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    /// Number of declared modules.
    pub modules: usize,
    /// Problems that make resolution fail.
    pub errors: Vec<String>,
    /// Problems that only fail in strict mode.
    pub warnings: Vec<String>,
}

impl ValidateCommand {
    /// Execute against an explicit or discovered manifest.
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let report = match Project::load(manifest_path).await {
            Ok(project) => {
                let ctx = self.context.resolve_against(&project.manifest);
                let mut report = check(&project.builder, &ctx, self.strict);
                report.manifest = Some(project.path.display().to_string());
                report
            }
            Err(e) if self.format == OutputFormat::Json => ValidationReport {
                errors: vec![format!("{e:#}")],
                ..Default::default()
            },
            Err(e) => return Err(e),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_text(&report),
        }

        if !report.valid {
            let count = report.errors.len() + if self.strict { report.warnings.len() } else { 0 };
            bail!("Validation failed with {count} problem(s)");
        }
        Ok(())
    }
}

/// Run every check against a registered module set.
///
/// `base` supplies platform and configuration; each target kind is checked.
pub fn check(builder: &GraphBuilder, base: &BuildContext, strict: bool) -> ValidationReport {
    // message -> target kinds it occurs for, in first-seen order
    let mut problems: Vec<(String, Vec<TargetKind>)> = Vec::new();
    for target in TargetKind::ALL {
        for problem in builder.diagnose(&base.with_target(target)) {
            let message = problem.to_string();
            match problems.iter_mut().find(|(m, _)| *m == message) {
                Some((_, targets)) => targets.push(target),
                None => problems.push((message, vec![target])),
            }
        }
    }

    let errors: Vec<String> = problems
        .into_iter()
        .map(|(message, targets)| {
            if targets.len() == TargetKind::ALL.len() {
                message
            } else {
                let names: Vec<_> = targets.iter().map(|t| t.as_str()).collect();
                format!("{message} (target: {})", names.join(", "))
            }
        })
        .collect();

    let warnings: Vec<String> = builder
        .descriptors()
        .iter()
        .flat_map(|d| {
            d.rules()
                .iter()
                .filter(|rule| !rule.condition().is_satisfiable())
                .map(move |rule| {
                    format!("Module '{}' has a rule that can never match: {}", d.name(), rule.condition())
                })
        })
        .collect();

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    ValidationReport {
        valid: errors.is_empty() && !(strict && !warnings.is_empty()),
        manifest: None,
        modules: builder.len(),
        errors,
        warnings,
    }
}

fn print_text(report: &ValidationReport) {
    for error in &report.errors {
        println!("{} {}", "✗".red(), error);
    }
    for warning in &report.warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }
    if report.valid {
        let name = report.manifest.as_deref().unwrap_or("manifest");
        println!("{} {} is valid ({} modules)", "✓".green(), name, report.modules);
    }
}
