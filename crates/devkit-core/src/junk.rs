//! Junk file and folder scanning.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ToolError;

/// Entry names treated as junk, files or directories.
pub const JUNK_PATTERNS: &[&str] = &[".DS_Store", "__pycache__", ".pytest_cache", ".ruff_cache"];

/// Every junk entry below `root`, in walk order. Matched directories are not
/// descended into.
pub fn find_junk(root: &Path) -> Result<Vec<PathBuf>, ToolError> {
    find_named(root, JUNK_PATTERNS)
}

/// Every entry below `root` whose file name is one of `names`.
pub fn find_named(root: &Path, names: &[&str]) -> Result<Vec<PathBuf>, ToolError> {
    if !root.exists() {
        return Err(ToolError::PathNotFound(root.to_path_buf()));
    }

    let mut matches = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| ToolError::Walk {
            path: root.to_path_buf(),
            source: e,
        })?;
        let is_match = entry
            .file_name()
            .to_str()
            .is_some_and(|name| names.contains(&name));
        if is_match {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

/// Delete every path in `matches` (directories recursively). Entries that are
/// already gone are skipped. Returns how many were removed.
pub fn remove_all(matches: &[PathBuf]) -> Result<usize, ToolError> {
    let mut removed = 0;
    for path in matches {
        let result = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ToolError::io(path, e)),
        }
    }
    tracing::debug!(removed, "Removed junk entries");
    Ok(removed)
}
