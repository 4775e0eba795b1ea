//! Reading package descriptors and launcher scripts.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::core::layout::PackageLayout;
use crate::core::record::{PackageFields, RecordRules, build_record};
use crate::core::types::Record;

/// Subset of a package `config.json` the extractor needs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
struct PackageConfig {
    extlist: String,
    #[serde(default)]
    label: Option<String>,
}

/// Matches the RetroArch core a launcher loads, e.g.
/// `.retroarch/cores/nestopia_libretro.so`.
static CORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".retroarch/cores/([^/\s]+)_libretro\.so").expect("core pattern compiles")
});

/// Backend identifier named by a launcher script, if any.
pub fn parse_core_id(launch: &str) -> Option<String> {
    CORE_RE
        .captures(launch)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read `config.json` and its sibling `launch.sh` into a record.
pub fn extract_record(layout: &PackageLayout, rules: &RecordRules) -> Result<Record> {
    let fields = read_fields(&layout.marker)?;

    let launch_path = layout.launch_script();
    let launch = fs::read_to_string(&launch_path)
        .with_context(|| format!("read launcher {}", launch_path.display()))?;
    let core = parse_core_id(launch.trim());
    if core.is_none() {
        debug!(launcher = %launch_path.display(), "no retroarch core in launcher");
    }

    build_record(layout, &fields, core, rules)
}

fn read_fields(path: &Path) -> Result<PackageFields> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: PackageConfig =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(PackageFields {
        extlist: config.extlist,
        label: config.label,
    })
}
