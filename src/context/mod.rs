//! Build configuration context.
//!
//! A [`BuildContext`] is the resolved set of parameters for one build
//! invocation. It is created once, never mutated, and is what
//! [`Condition`]s evaluate against.
//!
//! Raw input (CLI flags, environment variables, the manifest `[build]` table)
//! is collected into [`ContextOptions`] layers which are merged highest
//! precedence first and then turned into a context:
//!
//! ```rust
//! use modgraph_cli::context::{ContextOptions, TargetKind};
//!
//! let from_cli = ContextOptions { target: Some(TargetKind::Editor), ..Default::default() };
//! let from_manifest = ContextOptions { target: Some(TargetKind::Game), ..Default::default() };
//!
//! let ctx = from_cli.layered_over(&from_manifest).into_context();
//! assert_eq!(ctx.target(), TargetKind::Editor);
//! ```

mod condition;
mod kinds;

pub use condition::Condition;
pub use kinds::{BuildConfiguration, Platform, TargetKind};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable description of the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BuildContext {
    target: TargetKind,
    platform: Platform,
    configuration: BuildConfiguration,
}

impl BuildContext {
    /// Context for `target` with default platform and configuration.
    #[must_use]
    pub fn new(target: TargetKind) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Start building a context field by field.
    #[must_use]
    pub fn builder() -> BuildContextBuilder {
        BuildContextBuilder::default()
    }

    /// Target kind.
    #[must_use]
    pub const fn target(&self) -> TargetKind {
        self.target
    }

    /// Target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Build configuration.
    #[must_use]
    pub const fn configuration(&self) -> BuildConfiguration {
        self.configuration
    }

    /// Same platform and configuration, different target kind.
    #[must_use]
    pub const fn with_target(&self, target: TargetKind) -> Self {
        Self {
            target,
            platform: self.platform,
            configuration: self.configuration,
        }
    }

    /// Every combination of the three axes.
    pub fn all_combinations() -> impl Iterator<Item = BuildContext> {
        TargetKind::ALL.into_iter().flat_map(|target| {
            Platform::ALL.into_iter().flat_map(move |platform| {
                BuildConfiguration::ALL.into_iter().map(move |configuration| BuildContext {
                    target,
                    platform,
                    configuration,
                })
            })
        })
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.platform, self.configuration)
    }
}

/// Builder for [`BuildContext`]; unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct BuildContextBuilder {
    options: ContextOptions,
}

impl BuildContextBuilder {
    /// Set the target kind.
    #[must_use]
    pub fn target(mut self, target: TargetKind) -> Self {
        self.options.target = Some(target);
        self
    }

    /// Set the platform.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.options.platform = Some(platform);
        self
    }

    /// Set the configuration.
    #[must_use]
    pub fn configuration(mut self, configuration: BuildConfiguration) -> Self {
        self.options.configuration = Some(configuration);
        self
    }

    /// Finish the context.
    #[must_use]
    pub fn build(self) -> BuildContext {
        self.options.into_context()
    }
}

/// One layer of partially specified context values.
///
/// Deserialises from the manifest's `[build]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextOptions {
    /// Target kind, if this layer sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetKind>,
    /// Platform, if this layer sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Configuration, if this layer sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<BuildConfiguration>,
}

impl ContextOptions {
    /// Fill the fields this layer leaves unset from `lower`.
    #[must_use]
    pub fn layered_over(&self, lower: &ContextOptions) -> ContextOptions {
        ContextOptions {
            target: self.target.or(lower.target),
            platform: self.platform.or(lower.platform),
            configuration: self.configuration.or(lower.configuration),
        }
    }

    /// Resolve into a context, defaulting whatever is still unset.
    #[must_use]
    pub fn into_context(self) -> BuildContext {
        BuildContext {
            target: self.target.unwrap_or_default(),
            platform: self.platform.unwrap_or_default(),
            configuration: self.configuration.unwrap_or_default(),
        }
    }
}
