//! Predicates that conditional dependency rules evaluate against a [`BuildContext`].
//!
//! Conditions are plain data so new axes can be combined without code changes.
//! They serialise externally tagged, which reads naturally in a manifest:
//!
//! ```toml
//! when = { target = "editor" }
//! when = { not = { configuration = "shipping" } }
//! when = { any = [{ target = "editor" }, { target = "program" }] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BuildConfiguration, BuildContext, Platform, TargetKind};

/// A predicate over the fields of a [`BuildContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Holds when the context's target kind equals the value.
    Target(TargetKind),
    /// Holds when the context's platform equals the value.
    Platform(Platform),
    /// Holds when the context's configuration equals the value.
    Configuration(BuildConfiguration),
    /// Negation.
    Not(Box<Condition>),
    /// Conjunction; an empty list holds.
    All(Vec<Condition>),
    /// Disjunction; an empty list never holds.
    Any(Vec<Condition>),
}

impl Condition {
    /// `target == kind`.
    #[must_use]
    pub const fn target(kind: TargetKind) -> Self {
        Self::Target(kind)
    }

    /// `platform == platform`.
    #[must_use]
    pub const fn platform(platform: Platform) -> Self {
        Self::Platform(platform)
    }

    /// `configuration == configuration`.
    #[must_use]
    pub const fn configuration(configuration: BuildConfiguration) -> Self {
        Self::Configuration(configuration)
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against a context.
    #[must_use]
    pub fn matches(&self, ctx: &BuildContext) -> bool {
        match self {
            Condition::Target(kind) => ctx.target() == *kind,
            Condition::Platform(platform) => ctx.platform() == *platform,
            Condition::Configuration(configuration) => ctx.configuration() == *configuration,
            Condition::Not(inner) => !inner.matches(ctx),
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(ctx)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.matches(ctx)),
        }
    }

    /// Whether at least one context in the full axis product satisfies this condition.
    ///
    /// The product is small (a few hundred contexts), so this enumerates it.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        BuildContext::all_combinations().any(|ctx| self.matches(&ctx))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, name: &str, items: &[Condition]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, ")")
        }

        match self {
            Condition::Target(kind) => write!(f, "target == {kind}"),
            Condition::Platform(platform) => write!(f, "platform == {platform}"),
            Condition::Configuration(configuration) => {
                write!(f, "configuration == {configuration}")
            }
            Condition::Not(inner) => write!(f, "not({inner})"),
            Condition::All(items) => join(f, "all", items),
            Condition::Any(items) => join(f, "any", items),
        }
    }
}
