//! TOML storage for aggregated `consoles.toml` / `cores.toml` documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::aggregate::{ConsoleMap, CoreGroup, CoreMap, Groups};
use crate::core::types::GroupBy;

/// `cores.toml` nests every core under a `[cores]` table.
#[derive(Debug, Serialize, Deserialize)]
struct CoresDocument<M> {
    cores: M,
}

/// Serialize `groups` in the layout matching their grouping mode.
pub fn to_toml(groups: &Groups) -> Result<String> {
    let buf = match groups {
        Groups::Console(map) => toml::to_string(map).context("serialize consoles toml")?,
        Groups::Core(map) => {
            toml::to_string(&CoresDocument { cores: map }).context("serialize cores toml")?
        }
    };
    Ok(buf)
}

/// Parse a document written by [`to_toml`].
pub fn from_toml(contents: &str, group_by: GroupBy) -> Result<Groups> {
    let groups = match group_by {
        GroupBy::Console => {
            Groups::Console(toml::from_str::<ConsoleMap>(contents).context("parse consoles toml")?)
        }
        GroupBy::Core => Groups::Core(
            toml::from_str::<CoresDocument<CoreMap>>(contents)
                .context("parse cores toml")?
                .cores,
        ),
    };
    Ok(groups)
}

/// Overwrite `path` with the serialized groups (temp file + rename).
pub fn write_groups(path: &Path, groups: &Groups) -> Result<()> {
    debug!(path = %path.display(), groups = groups.len(), "writing groups");
    let buf = to_toml(groups)?;
    write_atomic(path, &buf)
}

/// Load a previously written document.
pub fn read_groups(path: &Path, group_by: GroupBy) -> Result<Groups> {
    debug!(path = %path.display(), %group_by, "reading groups");
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    from_toml(&contents, group_by).with_context(|| format!("load {}", path.display()))
}

/// Render core groups as commented TOML blocks for stdout.
///
/// Each block starts with one `#` line per contributing package.
pub fn render_core_blocks(map: &CoreMap) -> Result<String> {
    let mut blocks = Vec::with_capacity(map.len());
    for (key, group) in map {
        let mut block = String::new();
        let packages: IndexSet<&str> = group.packages.iter().map(String::as_str).collect();
        for package in packages {
            block.push_str("# ");
            block.push_str(package);
            block.push('\n');
        }
        let single: IndexMap<&str, &CoreGroup> = IndexMap::from([(key.as_str(), group)]);
        block.push_str(
            &toml::to_string(&CoresDocument { cores: single })
                .with_context(|| format!("serialize core {key}"))?,
        );
        blocks.push(block);
    }
    Ok(blocks.join("\n"))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::test_support::record;

    fn console_groups() -> Groups {
        let records = [
            record("Nintendo - GB (Gambatte)", "Nintendo - Game Boy", Some("gambatte"), "GB", &["gb"]),
            record("Nintendo - GB (Custom)", "Nintendo - Game Boy", None, "GB", &["sgb"]),
            record("Sega - Genesis (PicoDrive)", "Sega - Genesis", Some("picodrive"), "MD", &["md", "gen"]),
        ];
        aggregate(GroupBy::Console, &records).expect("aggregate")
    }

    fn core_groups() -> Groups {
        let records = [
            record("Nintendo - NES (Nestopia)", "Nestopia", Some("nestopia"), "NES", &["nes"]),
            record("Nintendo - FDS (Nestopia)", "Nestopia", Some("nestopia"), "FDS", &["fds"]),
            record("Pico-8", "UNKNOWN", None, "PICO", &["p8"]),
        ];
        aggregate(GroupBy::Core, &records).expect("aggregate")
    }

    #[test]
    fn console_document_layout() {
        let buf = to_toml(&console_groups()).expect("serialize");
        assert!(buf.starts_with("[\"Nintendo - Game Boy\"]\n"));
        assert!(buf.contains("cores = [\"gambatte\", \"\"]"));
        assert!(buf.contains("folders = [\"GB\"]"));
        assert!(buf.contains("[\"Sega - Genesis\"]"));
    }

    #[test]
    fn console_document_round_trips() {
        let groups = console_groups();
        let parsed = from_toml(&to_toml(&groups).expect("serialize"), GroupBy::Console)
            .expect("parse");
        assert_eq!(parsed, groups);

        let Groups::Console(map) = parsed else {
            panic!("expected console groups");
        };
        assert_eq!(
            map["Nintendo - Game Boy"].cores,
            vec![Some("gambatte".to_string()), None]
        );
    }

    #[test]
    fn core_document_round_trips_without_packages() {
        let groups = core_groups();
        let buf = to_toml(&groups).expect("serialize");
        assert!(buf.contains("[cores.Nestopia]"));
        assert!(buf.contains("retroarch_core = \"nestopia\""));

        let Groups::Core(parsed) = from_toml(&buf, GroupBy::Core).expect("parse") else {
            panic!("expected core groups");
        };
        let Groups::Core(original) = groups else {
            panic!("expected core groups");
        };
        assert_eq!(parsed.keys().collect::<Vec<_>>(), original.keys().collect::<Vec<_>>());
        assert_eq!(parsed["Nestopia"].patterns, vec!["NES", "FDS"]);
        assert_eq!(parsed["UNKNOWN"].retroarch_core, "UNKNOWN");
        assert!(parsed["Nestopia"].packages.is_empty());
    }

    #[test]
    fn write_overwrites_existing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out").join("consoles.toml");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "stale = true\n").expect("seed");

        let groups = console_groups();
        write_groups(&path, &groups).expect("write");
        let loaded = read_groups(&path, GroupBy::Console).expect("read");
        assert_eq!(loaded, groups);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn read_reports_path_on_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("cores.toml");
        fs::write(&path, "[cores.A]\npatterns = 3\n").expect("seed");
        let err = read_groups(&path, GroupBy::Core).expect_err("invalid");
        assert!(format!("{err:#}").contains("cores.toml"));
    }

    #[test]
    fn core_blocks_are_commented() {
        let Groups::Core(map) = core_groups() else {
            panic!("expected core groups");
        };
        let rendered = render_core_blocks(&map).expect("render");
        assert!(rendered.starts_with("# Nintendo - NES (Nestopia)\n# Nintendo - FDS (Nestopia)\n"));
        assert!(rendered.contains("[cores.Nestopia]"));
        assert!(rendered.contains("\n# Pico-8\n"));
        assert!(rendered.contains("[cores.UNKNOWN]"));
    }
}
