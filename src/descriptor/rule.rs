use serde::Serialize;

use crate::context::{BuildContext, Condition};
use crate::core::Visibility;

/// Dependencies that only apply when a [`Condition`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalRule {
    when: Condition,
    visibility: Visibility,
    dependencies: Vec<String>,
}

impl ConditionalRule {
    /// Rule adding `dependencies` with `visibility` when `when` holds.
    pub fn new<I, S>(when: Condition, visibility: Visibility, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            when,
            visibility,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Rule adding public dependencies.
    pub fn public<I, S>(when: Condition, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(when, Visibility::Public, dependencies)
    }

    /// Rule adding private dependencies.
    pub fn private<I, S>(when: Condition, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(when, Visibility::Private, dependencies)
    }

    /// The predicate.
    #[must_use]
    pub const fn condition(&self) -> &Condition {
        &self.when
    }

    /// Visibility applied to every dependency of this rule.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Dependencies in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether the rule applies to `ctx`.
    #[must_use]
    pub fn applies_to(&self, ctx: &BuildContext) -> bool {
        self.when.matches(ctx)
    }
}
