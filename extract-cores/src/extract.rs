//! Extraction: walk package roots, derive records, aggregate groups.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::aggregate::Groups;
use crate::core::layout::PackageLayout;
use crate::core::record::RecordRules;
use crate::core::types::Record;
use crate::io::config::Source;
use crate::io::package::extract_record;
use crate::io::walk::{marker_files, scan_root};

/// Aggregate every accepted package below `sources` into a fresh
/// accumulator.
///
/// `on_record` sees each accepted record before it is merged. Packages a
/// source's whitelist rejects are skipped before their files are read.
pub fn extract_groups(
    sources: &[Source],
    rules: &RecordRules,
    mut on_record: impl FnMut(&Record),
) -> Result<Groups> {
    let mut groups = Groups::new(rules.group_by);
    for source in sources {
        let root = scan_root(&source.path)?;
        info!(root = %root.display(), whitelist = source.whitelist.is_some(), "scanning source");
        for marker in marker_files(&root) {
            let marker: PathBuf = marker?;
            let layout = PackageLayout::from_marker(&root, &marker)?;
            if !source.accepts(&layout.name) {
                debug!(package = %layout.name, "not whitelisted");
                continue;
            }
            let record = extract_record(&layout, rules)
                .with_context(|| format!("extract package {}", layout.package_dir.display()))?;
            on_record(&record);
            groups.add(&record)?;
        }
    }
    info!(groups = groups.len(), group_by = %rules.group_by, "extraction complete");
    Ok(groups)
}
