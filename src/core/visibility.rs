use serde::{Deserialize, Serialize};

/// Visibility of a dependency edge.
///
/// A `Public` dependency is part of the declaring module's interface: anything
/// that depends on the declaring module can also see it. A `Private` dependency
/// is only usable by the declaring module's own implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Exposed to consumers of the declaring module.
    Public,
    /// Internal to the declaring module.
    Private,
}

impl Visibility {
    /// Combine two visibilities for the same dependency; the more permissive wins.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Public, _) | (_, Self::Public) => Self::Public,
            _ => Self::Private,
        }
    }

    /// Whether edges of this visibility extend the public surface.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
