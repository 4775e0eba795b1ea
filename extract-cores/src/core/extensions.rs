//! Extension list splitting and blacklist filtering.

use std::collections::BTreeSet;

use super::types::GroupBy;

/// Container, archive and disc-image formats shared by many consoles.
const BASE_BLACKLIST: &[&str] = &[
    "bin", "rom", "m3u", "cue", "iso", "img", "chd", "ccd", "zip", "7z",
];

/// Ambiguous tokens that only matter when grouping by device.
const CONSOLE_BLACKLIST: &[&str] = &[
    "dsk", "cas", "mx1", "mx2", "miyoocmd", "bs", "dmg", "fig", "tap",
];

/// Extensions never attributed to a single group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    entries: BTreeSet<String>,
}

impl Blacklist {
    /// Built-in blacklist for `group_by`.
    pub fn for_mode(group_by: GroupBy) -> Self {
        let mut entries: BTreeSet<String> =
            BASE_BLACKLIST.iter().map(|ext| ext.to_string()).collect();
        if group_by == GroupBy::Console {
            entries.extend(CONSOLE_BLACKLIST.iter().map(|ext| ext.to_string()));
        }
        Self { entries }
    }

    /// Add configured tokens on top of the built-in list.
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.extend(extra.into_iter().map(Into::into));
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.entries.contains(ext)
    }

    /// Split a pipe-delimited `extlist`, dropping empty and blacklisted
    /// entries. Declaration order is kept; duplicates are left to the caller.
    pub fn filter(&self, extlist: &str) -> Vec<String> {
        extlist
            .split('|')
            .filter(|ext| !ext.is_empty() && !self.contains(ext))
            .map(str::to_string)
            .collect()
    }
}
