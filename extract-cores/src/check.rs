//! Duplicate checks over a written document.

use std::path::Path;

use anyhow::Result;

use crate::core::aggregate::Groups;
use crate::core::duplicates::{Duplicate, DuplicateReport, find_duplicates};
use crate::core::types::GroupBy;
use crate::io::store::read_groups;

/// Read `path` back and collect cross-group collisions.
pub fn check_document(path: &Path, group_by: GroupBy) -> Result<DuplicateReport> {
    let report = match read_groups(path, group_by)? {
        Groups::Console(map) => find_duplicates(&map),
        Groups::Core(map) => find_duplicates(&map),
    };
    Ok(report)
}

/// Human-readable report, one block per duplicate.
///
/// ```text
/// Duplicate extension: gb
/// - Nintendo - Game Boy
/// - Nintendo - Game Boy Color
/// ```
pub fn render_report(report: &DuplicateReport, group_by: GroupBy) -> String {
    let token_kind = match group_by {
        GroupBy::Console => "folder",
        GroupBy::Core => "pattern",
    };
    let mut out = String::new();
    for duplicate in &report.extensions {
        push_block(&mut out, "extension", duplicate);
    }
    for duplicate in &report.tokens {
        push_block(&mut out, token_kind, duplicate);
    }
    out
}

fn push_block(out: &mut String, kind: &str, duplicate: &Duplicate) {
    out.push_str(&format!("Duplicate {kind}: {}\n", duplicate.value));
    for group in &duplicate.groups {
        out.push_str(&format!("- {group}\n"));
    }
    out.push('\n');
}
