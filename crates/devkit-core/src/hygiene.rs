//! Repository hygiene checks.

use std::path::Path;

use crate::error::ToolError;
use crate::junk::find_named;

/// One hygiene check. Failing checks are warnings, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HygieneCheck {
    pub name: String,
    pub ok: bool,
    pub notes: String,
}

/// Top-level paths every repository is expected to have, with their notes.
const EXPECTED: &[(&str, &str)] = &[
    ("README.md", "Top-level README file"),
    ("LICENSE", "License file present"),
    (".gitignore", "Git ignore rules"),
    ("src", "Source directory"),
];

/// Check `root` for the expected files and for stray `.DS_Store` files.
pub fn check_repository(root: &Path) -> Result<Vec<HygieneCheck>, ToolError> {
    if !root.is_dir() {
        return Err(ToolError::PathNotFound(root.to_path_buf()));
    }

    let mut checks: Vec<HygieneCheck> = EXPECTED
        .iter()
        .map(|(path, notes)| {
            let label = if *path == "src" {
                "src/".to_string()
            } else {
                (*path).to_string()
            };
            HygieneCheck {
                name: label,
                ok: root.join(path).exists(),
                notes: (*notes).to_string(),
            }
        })
        .collect();

    let junk = find_named(root, &[".DS_Store"])?;
    checks.push(HygieneCheck {
        name: "Junk files".to_string(),
        ok: junk.is_empty(),
        notes: format!("{} .DS_Store file(s) found", junk.len()),
    });

    Ok(checks)
}
