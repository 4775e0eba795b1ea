//! Per-run accumulators merging records into groups.
//!
//! Each run owns exactly one accumulator; nothing here is global, so the
//! same process can aggregate several trees independently.

use anyhow::{Result, bail};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::types::{GroupBy, Record};

/// One console entry in `consoles.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleGroup {
    /// Cores in encounter order. Unknown cores are kept as `None`.
    #[serde(default, with = "unknown_as_empty")]
    pub cores: Vec<Option<String>>,
    #[serde(default)]
    pub folders: IndexSet<String>,
    #[serde(default)]
    pub extensions: IndexSet<String>,
}

/// One core entry in `cores.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreGroup {
    pub retroarch_core: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Raw package names that contributed, for commented output only.
    #[serde(skip)]
    pub packages: Vec<String>,
}

/// Console groups keyed by canonical console name, in first-seen order.
pub type ConsoleMap = IndexMap<String, ConsoleGroup>;

/// Core groups keyed by core key, in first-seen order.
pub type CoreMap = IndexMap<String, CoreGroup>;

/// Accumulator for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Groups {
    Console(ConsoleMap),
    Core(CoreMap),
}

impl Groups {
    pub fn new(group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Console => Groups::Console(ConsoleMap::new()),
            GroupBy::Core => Groups::Core(CoreMap::new()),
        }
    }

    pub fn group_by(&self) -> GroupBy {
        match self {
            Groups::Console(_) => GroupBy::Console,
            Groups::Core(_) => GroupBy::Core,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Groups::Console(map) => map.len(),
            Groups::Core(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge one record into its group.
    ///
    /// Fails when a core key already maps to a different backend identifier.
    pub fn add(&mut self, record: &Record) -> Result<()> {
        match self {
            Groups::Console(map) => {
                add_console(map, record);
                Ok(())
            }
            Groups::Core(map) => add_core(map, record),
        }
    }
}

/// Aggregate `records` in order into a fresh accumulator.
pub fn aggregate<'a>(
    group_by: GroupBy,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<Groups> {
    let mut groups = Groups::new(group_by);
    for record in records {
        groups.add(record)?;
    }
    Ok(groups)
}

fn add_console(map: &mut ConsoleMap, record: &Record) {
    let group = map.entry(record.group_key.clone()).or_default();
    group.cores.push(record.core.clone());
    group.folders.insert(record.token.clone());
    group.extensions.extend(record.extensions.iter().cloned());
}

fn add_core(map: &mut CoreMap, record: &Record) -> Result<()> {
    let retroarch_core = record.core_or_unknown();
    let group = map
        .entry(record.group_key.clone())
        .or_insert_with(|| CoreGroup {
            retroarch_core: retroarch_core.to_string(),
            ..CoreGroup::default()
        });
    if group.retroarch_core != retroarch_core {
        bail!(
            "core {} maps to both {} and {} (package {})",
            record.group_key,
            group.retroarch_core,
            retroarch_core,
            record.name
        );
    }
    group.patterns.push(record.token.clone());
    group.extensions.extend(record.extensions.iter().cloned());
    group.packages.push(record.name.clone());
    Ok(())
}

/// TOML has no null, so unknown cores are stored as empty strings.
mod unknown_as_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cores: &[Option<String>], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(cores.iter().map(|core| core.as_deref().unwrap_or("")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<String>>, D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        Ok(raw
            .into_iter()
            .map(|core| (!core.is_empty()).then_some(core))
            .collect())
    }
}
