//! Cross-group collision detection for aggregated documents.

use indexmap::{IndexMap, IndexSet};

use super::aggregate::{ConsoleGroup, CoreGroup};

/// Values a group claims and that must be unique across groups.
pub trait ClaimedValues {
    fn extensions(&self) -> impl Iterator<Item = &str>;
    /// Folder names (consoles) or patterns (cores).
    fn tokens(&self) -> impl Iterator<Item = &str>;
}

impl ClaimedValues for ConsoleGroup {
    fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(String::as_str)
    }
}

impl ClaimedValues for CoreGroup {
    fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

/// A value claimed by more than one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub value: String,
    /// Claiming groups in document order.
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub extensions: Vec<Duplicate>,
    pub tokens: Vec<Duplicate>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.extensions.is_empty() && self.tokens.is_empty()
    }
}

/// Report every extension and token declared by two or more groups.
///
/// A group repeating a value on its own does not count as a collision.
pub fn find_duplicates<G: ClaimedValues>(groups: &IndexMap<String, G>) -> DuplicateReport {
    DuplicateReport {
        extensions: collisions(groups, |group| group.extensions()),
        tokens: collisions(groups, |group| group.tokens()),
    }
}

fn collisions<'a, G, F, I>(groups: &'a IndexMap<String, G>, values: F) -> Vec<Duplicate>
where
    G: ClaimedValues,
    F: Fn(&'a G) -> I,
    I: Iterator<Item = &'a str>,
{
    let mut claims: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for (name, group) in groups {
        for value in values(group) {
            claims.entry(value).or_default().insert(name.as_str());
        }
    }
    claims
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(value, names)| Duplicate {
            value: value.to_string(),
            groups: names.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
