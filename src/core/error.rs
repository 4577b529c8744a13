//! Error handling for modgraph
//!
//! This module provides the error taxonomy for descriptor validation and graph
//! resolution together with user-friendly error reporting for the CLI. The
//! error system follows two principles:
//! 1. **Strongly-typed errors** so callers can match on the exact failure
//! 2. **Actionable messages** that name the offending module(s) so a build
//!    author can find the declaration without further lookup
//!
//! # Architecture
//!
//! - [`ModgraphError`] - Enumerated error kinds for all failure cases
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Descriptor validation**: [`ModgraphError::DuplicateDependency`],
//!   [`ModgraphError::SelfDependency`], [`ModgraphError::ConflictingVisibility`],
//!   [`ModgraphError::InvalidDependency`]
//! - **Registration**: [`ModgraphError::DuplicateModule`],
//!   [`ModgraphError::MutationAfterRegistration`], [`ModgraphError::UnknownModule`]
//! - **Resolution**: [`ModgraphError::UnknownDependency`],
//!   [`ModgraphError::DependencyCycle`]
//! - **Loading and configuration**: [`ModgraphError::ManifestNotFound`],
//!   [`ModgraphError::ManifestParseError`], [`ModgraphError::InvalidContextValue`]
//!
//! None of these errors are retried: they describe authoring mistakes, not
//! transient conditions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use modgraph_cli::core::{ModgraphError, user_friendly_error};
//!
//! let error = ModgraphError::UnknownDependency {
//!     module: "GASP".to_string(),
//!     dependency: "PoseSearch".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result alias used by the descriptor and resolver APIs.
pub type Result<T, E = ModgraphError> = std::result::Result<T, E>;

/// The main error type for modgraph operations.
///
/// Every variant carries the names needed to point the author at the faulty
/// declaration: the declaring module, the dependency involved, and for cycles
/// the concrete path that closes the loop.
///
/// # Examples
///
/// ```rust,no_run
/// use modgraph_cli::core::ModgraphError;
///
/// fn explain(error: &ModgraphError) -> String {
///     match error {
///         ModgraphError::DependencyCycle { cycle } => {
///             format!("break the loop {}", cycle.join(" -> "))
///         }
///         ModgraphError::UnknownDependency { module, dependency } => {
///             format!("declare '{dependency}' or drop it from '{module}'")
///         }
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ModgraphError {
    /// The same dependency name appears twice in one dependency list.
    #[error("Module '{module}' lists '{dependency}' more than once in its {list} dependencies")]
    DuplicateDependency {
        /// Declaring module
        module: String,
        /// Repeated dependency name
        dependency: String,
        /// Which list held the duplicate ("public", "private", "rule #2")
        list: String,
    },

    /// Two descriptors share one module name.
    #[error("Module '{name}' is registered more than once")]
    DuplicateModule {
        /// Module name registered twice
        name: String,
    },

    /// A descriptor was extended after the graph builder sealed it.
    #[error("Module '{module}' cannot be modified after it has been registered")]
    MutationAfterRegistration {
        /// Sealed module
        module: String,
    },

    /// A resolved dependency names a module that was never registered.
    #[error("Module '{module}' depends on '{dependency}', which is not a registered module")]
    UnknownDependency {
        /// Referring module
        module: String,
        /// Missing module
        dependency: String,
    },

    /// The resolved edges contain a cycle.
    ///
    /// `cycle` starts and ends with the same module, e.g. `["A", "B", "A"]`.
    #[error("Dependency cycle detected: {}", cycle.join(" → "))]
    DependencyCycle {
        /// Concrete cycle found by depth-first search
        cycle: Vec<String>,
    },

    /// A name failed basic validation (for example it is empty).
    #[error("Invalid dependency declaration in module '{module}': {reason}")]
    InvalidDependency {
        /// Declaring module (may be empty when the module name itself is invalid)
        module: String,
        /// What was wrong
        reason: String,
    },

    /// A module lists itself as a dependency.
    #[error("Module '{module}' cannot depend on itself")]
    SelfDependency {
        /// Offending module
        module: String,
    },

    /// A dependency is declared both public and private in the base lists.
    #[error("Module '{module}' declares '{dependency}' as both public and private")]
    ConflictingVisibility {
        /// Declaring module
        module: String,
        /// Dependency present in both lists
        dependency: String,
    },

    /// A lookup or patch names a module that is not declared.
    #[error("Module '{name}' is not declared")]
    UnknownModule {
        /// Requested module name
        name: String,
    },

    /// A raw string could not be mapped onto one of the context enumerations.
    #[error("Invalid {axis} '{value}' (expected one of: {expected})")]
    InvalidContextValue {
        /// Axis name ("target", "platform", "configuration")
        axis: String,
        /// Rejected input
        value: String,
        /// Accepted spellings
        expected: String,
    },

    /// No manifest could be found.
    #[error("Manifest file modgraph.toml not found in current directory or any parent directory")]
    ManifestNotFound,

    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Manifest path
        file: String,
        /// Parser message
        reason: String,
    },

    /// I/O failure while reading inputs.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for ModgraphError {
    fn clone(&self) -> Self {
        match self {
            Self::DuplicateDependency {
                module,
                dependency,
                list,
            } => Self::DuplicateDependency {
                module: module.clone(),
                dependency: dependency.clone(),
                list: list.clone(),
            },
            Self::DuplicateModule {
                name,
            } => Self::DuplicateModule {
                name: name.clone(),
            },
            Self::MutationAfterRegistration {
                module,
            } => Self::MutationAfterRegistration {
                module: module.clone(),
            },
            Self::UnknownDependency {
                module,
                dependency,
            } => Self::UnknownDependency {
                module: module.clone(),
                dependency: dependency.clone(),
            },
            Self::DependencyCycle {
                cycle,
            } => Self::DependencyCycle {
                cycle: cycle.clone(),
            },
            Self::InvalidDependency {
                module,
                reason,
            } => Self::InvalidDependency {
                module: module.clone(),
                reason: reason.clone(),
            },
            Self::SelfDependency {
                module,
            } => Self::SelfDependency {
                module: module.clone(),
            },
            Self::ConflictingVisibility {
                module,
                dependency,
            } => Self::ConflictingVisibility {
                module: module.clone(),
                dependency: dependency.clone(),
            },
            Self::UnknownModule {
                name,
            } => Self::UnknownModule {
                name: name.clone(),
            },
            Self::InvalidContextValue {
                axis,
                value,
                expected,
            } => Self::InvalidContextValue {
                axis: axis.clone(),
                value: value.clone(),
                expected: expected.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            // io::Error is not Clone, keep the message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **error**: the main message in red
/// 2. **details**: additional context in yellow (optional)
/// 3. **suggestion**: an actionable next step in green (optional)
///
/// ```rust,no_run
/// use modgraph_cli::core::{ErrorContext, ModgraphError};
///
/// let context = ErrorContext::new(ModgraphError::ManifestNotFound)
///     .with_suggestion("Create a modgraph.toml file in your project directory")
///     .with_details("modgraph searches current and parent directories");
/// println!("{context}");
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ModgraphError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ModgraphError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// [`ModgraphError`] values anywhere in the chain get tailored advice; TOML
/// parse failures are reported as manifest syntax errors; everything else keeps
/// its full `Caused by` chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(modgraph_error) = cause.downcast_ref::<ModgraphError>() {
            return create_error_context(modgraph_error.clone());
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ModgraphError::ManifestParseError {
            file: "modgraph.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your modgraph.toml file. Verify quotes, brackets, and table headers")
        .with_details(toml_error.to_string());
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ModgraphError::Other {
        message,
    })
}

fn create_error_context(error: ModgraphError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        ModgraphError::DuplicateDependency { module, dependency, list } => (
            Some(format!(
                "Remove the repeated '{dependency}' entry from the {list} list of module '{module}'"
            )),
            None,
        ),

        ModgraphError::DuplicateModule { name } => (
            Some(format!("Rename one of the '{name}' modules or merge their declarations")),
            Some("Module names identify graph nodes and must be unique across the project".into()),
        ),

        ModgraphError::MutationAfterRegistration { module } => (
            Some(format!(
                "Apply all dependency changes to '{module}' before registering it with the graph builder"
            )),
            Some("Registered descriptors are sealed so every resolution sees the same inputs".into()),
        ),

        ModgraphError::UnknownDependency { module, dependency } => (
            Some(format!(
                "Declare a module named '{dependency}' or remove it from the dependencies of '{module}'"
            )),
            Some("Dependency names are case-sensitive and must match a declared module exactly".into()),
        ),

        ModgraphError::DependencyCycle { cycle } => (
            Some(match cycle.as_slice() {
                [first, second, ..] => format!(
                    "Break the cycle by removing one edge, for example the dependency of '{first}' on '{second}'"
                ),
                _ => "Break the cycle by removing one of the listed dependencies".to_string(),
            }),
            Some("Modules must form a directed acyclic graph so a build order exists".into()),
        ),

        ModgraphError::SelfDependency { module } => {
            (Some(format!("Remove '{module}' from its own dependency lists")), None)
        }

        ModgraphError::ConflictingVisibility { module, dependency } => (
            Some(format!(
                "Keep '{dependency}' in exactly one of the public or private lists of '{module}'"
            )),
            Some("Public dependencies are visible to consumers; private ones are internal".into()),
        ),

        ModgraphError::InvalidDependency { .. } => {
            (Some("Module and dependency names must be non-empty strings".into()), None)
        }

        ModgraphError::UnknownModule { name } => (
            Some(format!("Check the spelling of '{name}' or add a [[module]] entry for it")),
            None,
        ),

        ModgraphError::InvalidContextValue { axis, expected, .. } => {
            (Some(format!("Pass --{axis} with one of: {expected}")), None)
        }

        ModgraphError::ManifestNotFound => (
            Some("Create a modgraph.toml file in your project directory or pass --manifest-path".into()),
            Some("modgraph looks for modgraph.toml in the current directory and parent directories up to the filesystem root".into()),
        ),

        ModgraphError::ManifestParseError { reason, .. } => (
            Some("Check the TOML syntax and that every [[module]] has a name".into()),
            Some(reason.clone()),
        ),

        ModgraphError::IoError(_) | ModgraphError::Other { .. } => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    ctx.suggestion = suggestion;
    ctx.details = details;
    ctx
}
