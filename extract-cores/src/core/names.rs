//! Console name derivation and alias canonicalization.

use std::collections::BTreeMap;

/// Built-in aliases mapping short platform names to their display form.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Nintendo - GB", "Nintendo - Game Boy"),
    ("Nintendo - GBC", "Nintendo - Game Boy Color"),
    ("Nintendo - GBA", "Nintendo - Game Boy Advance"),
    ("Nintendo - Super Game Boy", "Nintendo - Game Boy Color"),
    (".Java - J2ME", "Java - J2ME"),
];

/// Alias table applied to every derived console name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliases {
    table: BTreeMap<String, String>,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            table: DEFAULT_ALIASES
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
        }
    }
}

impl Aliases {
    /// Built-in aliases overlaid with `extra` (entries in `extra` win).
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut aliases = Self::default();
        for (alias, canonical) in extra {
            aliases.table.insert(alias.clone(), canonical.clone());
        }
        aliases
    }

    pub fn canonicalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.table.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Display name for a raw package label: text before the first `(`,
/// trimmed, then canonicalized.
///
/// `"Nintendo - GB (TGB Dual)"` becomes `"Nintendo - Game Boy"`.
pub fn console_name(raw: &str, aliases: &Aliases) -> String {
    let stem = raw.split('(').next().unwrap_or(raw).trim();
    aliases.canonicalize(stem).to_string()
}

/// Parenthesized core label of a raw package name, if any.
///
/// `"Nintendo - NES (Nestopia)"` yields `Some("Nestopia")`.
pub fn core_label(raw: &str) -> Option<&str> {
    let open = raw.find('(')?;
    let rest = &raw[open + 1..];
    let close = rest.find(')')?;
    let label = rest[..close].trim();
    (!label.is_empty()).then_some(label)
}
