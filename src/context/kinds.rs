//! Closed enumerations that make up a [`BuildContext`](super::BuildContext).
//!
//! Each axis parses case-insensitively from the spellings a build invocation
//! layer typically passes on the command line and serialises in lowercase.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::ModgraphError;

/// The kind of binary a build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Standalone game runtime.
    #[default]
    Game,
    /// Editor build with authoring tools.
    Editor,
    /// Dedicated server.
    Server,
    /// Client-only runtime.
    Client,
    /// Standalone utility program.
    Program,
}

impl TargetKind {
    /// Every target kind in declaration order.
    pub const ALL: [Self; 5] = [Self::Game, Self::Editor, Self::Server, Self::Client, Self::Program];

    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Game => "game",
            TargetKind::Editor => "editor",
            TargetKind::Server => "server",
            TargetKind::Client => "client",
            TargetKind::Program => "program",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = ModgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" => Ok(TargetKind::Game),
            "editor" => Ok(TargetKind::Editor),
            "server" => Ok(TargetKind::Server),
            "client" => Ok(TargetKind::Client),
            "program" => Ok(TargetKind::Program),
            _ => Err(invalid("target", s, &Self::ALL.map(|k| k.as_str()))),
        }
    }
}

/// Operating system family a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// 64-bit Windows.
    Win64,
    /// macOS.
    Mac,
    /// Linux.
    #[default]
    Linux,
    /// Android.
    Android,
    /// iOS.
    Ios,
}

impl Platform {
    /// Every platform in declaration order.
    pub const ALL: [Self; 5] = [Self::Win64, Self::Mac, Self::Linux, Self::Android, Self::Ios];

    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Win64 => "win64",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ModgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win64" | "windows" => Ok(Platform::Win64),
            "mac" | "macos" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            _ => Err(invalid("platform", s, &Self::ALL.map(|p| p.as_str()))),
        }
    }
}

/// Optimisation and instrumentation level of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    /// Everything unoptimised.
    Debug,
    /// Engine optimised, game code unoptimised.
    DebugGame,
    /// Optimised with developer tooling.
    #[default]
    Development,
    /// Shipping-like with test hooks.
    Test,
    /// Final release.
    Shipping,
}

impl BuildConfiguration {
    /// Every configuration in declaration order.
    pub const ALL: [Self; 5] =
        [Self::Debug, Self::DebugGame, Self::Development, Self::Test, Self::Shipping];

    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "debug",
            BuildConfiguration::DebugGame => "debuggame",
            BuildConfiguration::Development => "development",
            BuildConfiguration::Test => "test",
            BuildConfiguration::Shipping => "shipping",
        }
    }
}

impl std::fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = ModgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(BuildConfiguration::Debug),
            "debuggame" | "debug-game" => Ok(BuildConfiguration::DebugGame),
            "development" | "dev" => Ok(BuildConfiguration::Development),
            "test" => Ok(BuildConfiguration::Test),
            "shipping" => Ok(BuildConfiguration::Shipping),
            _ => Err(invalid("configuration", s, &Self::ALL.map(|c| c.as_str()))),
        }
    }
}

fn invalid(axis: &str, value: &str, expected: &[&str]) -> ModgraphError {
    ModgraphError::InvalidContextValue {
        axis: axis.to_string(),
        value: value.to_string(),
        expected: expected.join(", "),
    }
}
