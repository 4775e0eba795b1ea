//! Tool configuration stored in `extract-cores.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::names::Aliases;
use crate::core::record::RecordRules;
use crate::core::types::GroupBy;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "extract-cores.toml";

/// Extraction settings (TOML).
///
/// Every field is optional; missing fields fall back to the Onion package
/// layout the tool was written against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Output path for console grouping.
    pub consoles_output: PathBuf,

    /// Output path for core grouping.
    pub cores_output: PathBuf,

    /// Extensions dropped in addition to the built-in blacklist.
    pub extra_blacklist: Vec<String>,

    /// Console name aliases applied on top of the built-in table.
    pub aliases: BTreeMap<String, String>,

    /// Package roots scanned in order.
    pub sources: Vec<Source>,
}

/// One scanned package root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    /// Raw package names to accept. `None` accepts every package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Vec<String>>,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            whitelist: None,
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.whitelist
            .as_ref()
            .is_none_or(|names| names.iter().any(|accepted| accepted == name))
    }
}

const RAPP_WHITELIST: &[&str] = &[
    ".Java - J2ME (SquirrelJME)",
    "Game engien - EasyRPG",
    "Nintendo - GBA (gpSP)",
    "Nintendo - GB (TGB Dual)",
    "Nintendo - NES (Nestopia)",
    "Nintendo - SNES (Snes9x)",
    "NEC - PC-98 (Neko Project II Kai)",
    "NEC - PC-FX (Mednafen PC-FX)",
];

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            consoles_output: PathBuf::from("consoles.toml"),
            cores_output: PathBuf::from("cores.toml"),
            extra_blacklist: Vec::new(),
            aliases: BTreeMap::new(),
            sources: vec![
                Source::new("../../Onion/static/packages/Emu"),
                Source {
                    path: PathBuf::from("../../Onion/static/packages/Rapp"),
                    whitelist: Some(RAPP_WHITELIST.iter().map(|name| name.to_string()).collect()),
                },
            ],
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.consoles_output.as_os_str().is_empty() {
            return Err(anyhow!("consoles_output must be non-empty"));
        }
        if self.cores_output.as_os_str().is_empty() {
            return Err(anyhow!("cores_output must be non-empty"));
        }
        if self.sources.is_empty() {
            return Err(anyhow!("sources must be a non-empty array"));
        }
        for (index, source) in self.sources.iter().enumerate() {
            if source.path.as_os_str().is_empty() {
                return Err(anyhow!("sources[{index}].path must be non-empty"));
            }
        }
        if self.extra_blacklist.iter().any(|ext| ext.trim().is_empty()) {
            return Err(anyhow!("extra_blacklist entries must be non-empty"));
        }
        for (alias, canonical) in &self.aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(anyhow!("aliases must map non-empty names"));
            }
        }
        Ok(())
    }

    /// Document path for `group_by`.
    pub fn output(&self, group_by: GroupBy) -> &Path {
        match group_by {
            GroupBy::Console => &self.consoles_output,
            GroupBy::Core => &self.cores_output,
        }
    }

    /// Built-in rules for `group_by` extended with configured entries.
    pub fn rules(&self, group_by: GroupBy) -> RecordRules {
        let mut rules = RecordRules::new(group_by);
        rules.blacklist.extend(self.extra_blacklist.iter().cloned());
        rules.aliases = Aliases::with_extra(&self.aliases);
        rules
    }

    /// Replace configured sources with whitelist-free `roots`, if any.
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        if !roots.is_empty() {
            self.sources = roots.into_iter().map(Source::new).collect();
        }
        self
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ToolConfig::default()`.
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = ToolConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ToolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
