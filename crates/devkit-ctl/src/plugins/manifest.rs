//! Plugin manifest parsing (`devkit-plugin.toml`).

use std::path::{Path, PathBuf};

use heck::ToKebabCase;
use serde::Deserialize;

pub(crate) const MANIFEST_FILENAME: &str = "devkit-plugin.toml";

/// Top-level plugin manifest parsed from `devkit-plugin.toml`.
#[derive(Debug, Deserialize)]
pub(crate) struct PluginManifest {
    /// Plugin metadata.
    pub plugin: ManifestPlugin,
}

/// The `[plugin]` table.
#[derive(Debug, Deserialize)]
pub(crate) struct ManifestPlugin {
    /// Plugin name shown by `devkit plugins` (e.g., "hello").
    pub name: String,

    /// Plugin version.
    pub version: String,

    /// Human-readable description, also used as the subcommand help.
    #[serde(default)]
    pub description: String,

    /// Subcommand name. Defaults to the kebab-cased plugin name.
    pub command: Option<String>,

    /// Program to run, relative to the manifest directory or absolute.
    pub exec: String,
}

impl PluginManifest {
    /// Load a manifest from a directory containing `devkit-plugin.toml`.
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let manifest_path = dir.join(MANIFEST_FILENAME);
        let contents = std::fs::read_to_string(&manifest_path).map_err(|e| ManifestError::Io {
            path: manifest_path.clone(),
            source: e,
        })?;
        let manifest: Self = toml::from_str(&contents).map_err(|e| ManifestError::Parse {
            path: manifest_path.clone(),
            source: e,
        })?;

        let problems = manifest.validate();
        if !problems.is_empty() {
            return Err(ManifestError::Invalid {
                path: manifest_path,
                problems: problems.join("; "),
            });
        }
        Ok(manifest)
    }

    /// Problems that make the manifest unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.plugin.name.trim().is_empty() {
            errors.push("plugin.name is empty".to_string());
        }
        if self.plugin.version.trim().is_empty() {
            errors.push("plugin.version is empty".to_string());
        }
        if self.plugin.exec.trim().is_empty() {
            errors.push("plugin.exec is empty".to_string());
        }
        if self.command_name().is_empty() {
            errors.push("plugin.command is empty".to_string());
        }

        errors
    }

    /// Top-level subcommand this plugin attaches.
    pub fn command_name(&self) -> String {
        match &self.plugin.command {
            Some(command) => command.trim().to_string(),
            None => self.plugin.name.to_kebab_case(),
        }
    }

    /// Program path resolved against the manifest directory.
    pub fn exec_path(&self, dir: &Path) -> PathBuf {
        let exec = Path::new(&self.plugin.exec);
        if exec.is_absolute() {
            exec.to_path_buf()
        } else {
            dir.join(exec)
        }
    }
}

/// Errors that can occur during manifest loading.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid manifest {path}: {problems}")]
    Invalid { path: PathBuf, problems: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_manifest() {
        let toml_str = r#"
[plugin]
name = "hello"
version = "0.1.0"
description = "Says hello"
command = "greet"
exec = "bin/hello.sh"
"#;
        let manifest: PluginManifest = toml::from_str(toml_str).unwrap();
        assert_eq!(manifest.plugin.name, "hello");
        assert_eq!(manifest.command_name(), "greet");
        assert_eq!(
            manifest.exec_path(Path::new("/opt/hello")),
            PathBuf::from("/opt/hello/bin/hello.sh")
        );
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_command_defaults_to_kebab_name() {
        let toml_str = r#"
[plugin]
name = "Deploy Helper"
version = "1.0.0"
exec = "/usr/local/bin/deploy"
"#;
        let manifest: PluginManifest = toml::from_str(toml_str).unwrap();
        assert_eq!(manifest.command_name(), "deploy-helper");
        assert_eq!(manifest.plugin.description, "");
        assert_eq!(
            manifest.exec_path(Path::new("/ignored")),
            PathBuf::from("/usr/local/bin/deploy")
        );
    }

    #[test]
    fn test_validate_reports_empty_fields() {
        let toml_str = r#"
[plugin]
name = ""
version = ""
exec = ""
"#;
        let manifest: PluginManifest = toml::from_str(toml_str).unwrap();
        let errors = manifest.validate();
        assert!(errors.contains(&"plugin.name is empty".to_string()));
        assert!(errors.contains(&"plugin.version is empty".to_string()));
        assert!(errors.contains(&"plugin.exec is empty".to_string()));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = PluginManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "[plugin\nname=").unwrap();
        let err = PluginManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "[plugin]\nname = \"x\"\nversion = \"0.1.0\"\nexec = \"\"\n",
        )
        .unwrap();
        let err = PluginManifest::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("plugin.exec is empty"));
    }
}
