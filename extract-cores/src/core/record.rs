//! Record derivation from already-read package inputs.

use anyhow::{Result, anyhow};

use super::extensions::Blacklist;
use super::layout::PackageLayout;
use super::names::{Aliases, console_name, core_label};
use super::types::{GroupBy, Record, UNKNOWN_CORE};

/// Mode-specific rules applied to every package of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRules {
    pub group_by: GroupBy,
    pub blacklist: Blacklist,
    pub aliases: Aliases,
}

impl RecordRules {
    /// Built-in blacklist and aliases for `group_by`.
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            blacklist: Blacklist::for_mode(group_by),
            aliases: Aliases::default(),
        }
    }
}

/// Fields read from a package's `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFields {
    pub extlist: String,
    pub label: Option<String>,
}

/// Build the record for one package.
///
/// `core` is the identifier found in `launch.sh`, if any.
pub fn build_record(
    layout: &PackageLayout,
    fields: &PackageFields,
    core: Option<String>,
    rules: &RecordRules,
) -> Result<Record> {
    let (group_key, token) = match rules.group_by {
        GroupBy::Console => (
            console_name(&layout.name, &rules.aliases),
            layout.folder.clone(),
        ),
        GroupBy::Core => {
            let label = fields
                .label
                .clone()
                .ok_or_else(|| anyhow!("missing label in {}", layout.marker.display()))?;
            let key = match core.as_deref() {
                Some(id) => core_label(&layout.name).unwrap_or(id).to_string(),
                None => UNKNOWN_CORE.to_string(),
            };
            (key, label)
        }
    };

    Ok(Record {
        name: layout.name.clone(),
        group_key,
        core,
        token,
        extensions: rules.blacklist.filter(&fields.extlist),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn layout(relative: &str) -> PackageLayout {
        let root = Path::new("/packages");
        PackageLayout::from_marker(root, &root.join(relative)).expect("layout")
    }

    fn fields(extlist: &str, label: Option<&str>) -> PackageFields {
        PackageFields {
            extlist: extlist.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn console_record_from_example_tree() {
        let record = build_record(
            &layout("ConsoleA (CoreX)/App/pkg1/config.json"),
            &fields("nes|bin|", None),
            Some("nestopia".to_string()),
            &RecordRules::new(GroupBy::Console),
        )
        .expect("record");
        assert_eq!(
            record,
            Record {
                name: "ConsoleA (CoreX)".to_string(),
                group_key: "ConsoleA".to_string(),
                core: Some("nestopia".to_string()),
                token: "pkg1".to_string(),
                extensions: vec!["nes".to_string()],
            }
        );
    }

    #[test]
    fn core_record_uses_label_and_core_label() {
        let record = build_record(
            &layout("Nintendo - NES (Nestopia)/Emu/FC/config.json"),
            &fields("nes|fds|zip", Some("NES")),
            Some("nestopia".to_string()),
            &RecordRules::new(GroupBy::Core),
        )
        .expect("record");
        assert_eq!(record.group_key, "Nestopia");
        assert_eq!(record.token, "NES");
        assert_eq!(record.extensions, vec!["nes", "fds"]);
    }

    #[test]
    fn core_record_falls_back_to_identifier_then_sentinel() {
        let rules = RecordRules::new(GroupBy::Core);
        let with_core = build_record(
            &layout("Game engine - EasyRPG/RApp/RPG/config.json"),
            &fields("ldb", Some("EasyRPG")),
            Some("easyrpg".to_string()),
            &rules,
        )
        .expect("record");
        assert_eq!(with_core.group_key, "easyrpg");

        let without_core = build_record(
            &layout("Game engine - EasyRPG/RApp/RPG/config.json"),
            &fields("ldb", Some("EasyRPG")),
            None,
            &rules,
        )
        .expect("record");
        assert_eq!(without_core.group_key, UNKNOWN_CORE);
        assert_eq!(without_core.core_or_unknown(), UNKNOWN_CORE);
    }

    #[test]
    fn core_less_package_ignores_its_label() {
        let record = build_record(
            &layout(".Java - J2ME (SquirrelJME)/Emu/JAVA/config.json"),
            &fields("jar|jad", Some("J2ME")),
            None,
            &RecordRules::new(GroupBy::Core),
        )
        .expect("record");
        assert_eq!(record.group_key, UNKNOWN_CORE);
        assert_eq!(record.token, "J2ME");
    }

    #[test]
    fn core_mode_requires_label() {
        let err = build_record(
            &layout("Nintendo - NES (Nestopia)/Emu/FC/config.json"),
            &fields("nes", None),
            None,
            &RecordRules::new(GroupBy::Core),
        )
        .expect_err("label required");
        assert!(err.to_string().contains("missing label"));
    }

    #[test]
    fn console_names_are_canonicalized() {
        let layout = layout("Nintendo - GB (TGB Dual)/RApp/GB/config.json");
        let console = build_record(
            &layout,
            &fields("gb", Some("GB")),
            Some("tgbdual".to_string()),
            &RecordRules::new(GroupBy::Console),
        )
        .expect("record");
        assert_eq!(console.group_key, "Nintendo - Game Boy");
    }
}
