//! Directory walk locating package marker files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// File whose presence marks a package directory.
pub const MARKER_FILE: &str = "config.json";

/// Canonicalize `root` so markers and layouts share one absolute prefix.
pub fn scan_root(root: &Path) -> Result<PathBuf> {
    fs::canonicalize(root).with_context(|| format!("open scan root {}", root.display()))
}

/// Lazily yield every `config.json` below `root`.
///
/// Traversal is depth-first with entries sorted by file name at each level,
/// so repeated runs over an unchanged tree visit markers in the same order.
/// Read errors are yielded in place and end nothing on their own; callers
/// decide whether to stop.
pub fn marker_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> + use<> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => (entry.file_type().is_file() && entry.file_name() == MARKER_FILE)
                .then(|| Ok(entry.into_path())),
            Err(err) => Some(Err(err).context("walk package tree")),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, "{}").expect("write");
    }

    #[test]
    fn finds_markers_depth_first_in_name_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = scan_root(temp.path()).expect("root");
        touch(&root.join("b/Emu/B/config.json"));
        touch(&root.join("a/Emu/Z/config.json"));
        touch(&root.join("a/Emu/A/config.json"));
        touch(&root.join("a/Emu/A/launch.sh"));
        touch(&root.join("a/Emu/A/config.json.bak"));

        let found: Vec<PathBuf> = marker_files(&root)
            .collect::<Result<_>>()
            .expect("walk");
        assert_eq!(
            found,
            vec![
                root.join("a/Emu/A/config.json"),
                root.join("a/Emu/Z/config.json"),
                root.join("b/Emu/B/config.json"),
            ]
        );
        assert!(found.iter().all(|path| path.is_absolute()));
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = scan_root(&temp.path().join("missing")).expect_err("missing root");
        assert!(err.to_string().contains("open scan root"));

        let walked: Vec<Result<PathBuf>> = marker_files(&temp.path().join("missing")).collect();
        assert_eq!(walked.len(), 1);
        assert!(walked[0].is_err());
    }
}
