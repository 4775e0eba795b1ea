//! Test-only helpers for building package trees and records.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::Record;

/// Temporary package tree rooted at a canonical absolute path.
pub struct PackageTree {
    _temp: TempDir,
    root: PathBuf,
}

impl PackageTree {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = fs::canonicalize(temp.path()).context("canonicalize tempdir")?;
        Ok(Self { _temp: temp, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `<dir>/config.json` and, when given, `<dir>/launch.sh`.
    pub fn package(&self, dir: &str, config: &str, launch: Option<&str>) -> Result<PathBuf> {
        let package_dir = self.root.join(dir);
        fs::create_dir_all(&package_dir)
            .with_context(|| format!("create {}", package_dir.display()))?;
        fs::write(package_dir.join("config.json"), config).context("write config.json")?;
        if let Some(launch) = launch {
            fs::write(package_dir.join("launch.sh"), launch).context("write launch.sh")?;
        }
        Ok(package_dir)
    }

    /// Write a RetroArch package with the usual Onion launcher.
    pub fn retroarch_package(
        &self,
        dir: &str,
        label: &str,
        extlist: &str,
        core: &str,
    ) -> Result<PathBuf> {
        let config = serde_json::json!({
            "label": label,
            "icon": "",
            "launch": "launch.sh",
            "extlist": extlist,
        });
        let launch = format!(
            "#!/bin/sh\ncd /mnt/SDCARD/RetroArch/\nHOME=/mnt/SDCARD/RetroArch/ ./retroarch -v -L .retroarch/cores/{core}_libretro.so \"$1\"\n"
        );
        self.package(dir, &config.to_string(), Some(&launch))
    }
}

/// Create a record with explicit fields.
pub fn record(
    name: &str,
    group_key: &str,
    core: Option<&str>,
    token: &str,
    extensions: &[&str],
) -> Record {
    Record {
        name: name.to_string(),
        group_key: group_key.to_string(),
        core: core.map(str::to_string),
        token: token.to_string(),
        extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
    }
}
