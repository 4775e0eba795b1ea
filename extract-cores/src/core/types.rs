//! Shared types for package records and grouping modes.

use std::fmt;

use clap::ValueEnum;

/// Core key and identifier used when a launcher names no RetroArch core.
pub const UNKNOWN_CORE: &str = "UNKNOWN";

/// How records are bucketed into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum GroupBy {
    /// Group by canonical console/device name (`consoles.toml`).
    #[default]
    Console,
    /// Group by core key (`cores.toml`).
    Core,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Console => f.write_str("console"),
            GroupBy::Core => f.write_str("core"),
        }
    }
}

/// A normalized view of one package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Raw package directory label, e.g. `Nintendo - NES (Nestopia)`.
    pub name: String,
    /// Console name or core key, depending on the grouping mode.
    pub group_key: String,
    /// Backend identifier parsed from `launch.sh`.
    pub core: Option<String>,
    /// Folder name (console mode) or descriptor label (core mode).
    pub token: String,
    /// Filtered extensions in declaration order.
    pub extensions: Vec<String>,
}

impl Record {
    /// The identifier as written into `cores.toml`.
    pub fn core_or_unknown(&self) -> &str {
        self.core.as_deref().unwrap_or(UNKNOWN_CORE)
    }
}
