//! Manifest plugin discovery via 2-level path scanning.
//!
//! For each configured path, checks three locations:
//! 1. The path itself (contains `devkit-plugin.toml`)
//! 2. Immediate subdirectories (`<path>/hello/devkit-plugin.toml`)
//! 3. Nested plugin directories (`<path>/hello/devkit-plugin/devkit-plugin.toml`)

use std::path::{Path, PathBuf};

use super::manifest::MANIFEST_FILENAME;

const PLUGIN_SUBDIR: &str = "devkit-plugin";

/// Discover all directories containing a `devkit-plugin.toml` under the given search paths.
///
/// Subdirectories are visited in name order so discovery (and therefore the
/// subcommand conflict policy) is deterministic.
pub(crate) fn discover_plugin_dirs(search_paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for base in search_paths {
        if !base.is_dir() {
            tracing::debug!(?base, "Plugin search path does not exist, skipping");
            continue;
        }

        // Level 0: path itself
        if has_manifest(base) {
            found.push(base.clone());
            continue;
        }

        let entries = match std::fs::read_dir(base) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(?base, error = %e, "Cannot read plugin search path");
                continue;
            }
        };

        let mut subdirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        for subdir in subdirs {
            // Level 1: immediate subdir (e.g., hello/devkit-plugin.toml)
            if has_manifest(&subdir) {
                found.push(subdir);
                continue;
            }

            // Level 2: nested plugin subdir (e.g., hello/devkit-plugin/devkit-plugin.toml)
            let nested = subdir.join(PLUGIN_SUBDIR);
            if nested.is_dir() && has_manifest(&nested) {
                found.push(nested);
            }
        }
    }

    found
}

fn has_manifest(dir: &Path) -> bool {
    dir.join(MANIFEST_FILENAME).is_file()
}
