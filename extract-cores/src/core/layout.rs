//! Named path components for a package marker file.
//!
//! Packages are laid out as `<package>/<dir>/<folder>/config.json` below a
//! scan root, e.g. `Nintendo - NES (Nestopia)/Emu/FC/config.json`.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow, bail};

/// Components of a `config.json` location that records are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    /// Path to the marker file itself.
    pub marker: PathBuf,
    /// Directory holding `config.json` and `launch.sh`.
    pub package_dir: PathBuf,
    /// Base name of `package_dir`.
    pub folder: String,
    /// Base name three levels above the marker (the raw package label).
    pub name: String,
}

impl PackageLayout {
    /// Split `marker` into named components.
    ///
    /// `marker` must lie under `root` with at least
    /// `<package>/<dir>/<folder>/config.json` below it; shallower markers are
    /// rejected instead of borrowing names from outside the scan root.
    pub fn from_marker(root: &Path, marker: &Path) -> Result<Self> {
        let relative = marker.strip_prefix(root).map_err(|_| {
            anyhow!(
                "{} is not under scan root {}",
                marker.display(),
                root.display()
            )
        })?;
        let names: Vec<&str> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();
        if names.len() != relative.components().count() {
            bail!("{} has an unsupported path component", marker.display());
        }
        if names.len() < 4 {
            bail!(
                "{} does not match <package>/<dir>/<folder>/config.json",
                relative.display()
            );
        }

        let folder = names[names.len() - 2];
        let name = names[names.len() - 4];
        let package_dir = marker
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent", marker.display()))?
            .to_path_buf();

        Ok(Self {
            marker: marker.to_path_buf(),
            package_dir,
            folder: folder.to_string(),
            name: name.to_string(),
        })
    }

    /// Sibling launcher script.
    pub fn launch_script(&self) -> PathBuf {
        self.package_dir.join("launch.sh")
    }
}
