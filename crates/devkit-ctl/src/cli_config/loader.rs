//! Config file discovery and loading for `.devkit.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.devkit.toml` (project-local)
//! 2. `~/.config/devkit.toml` (user-global)

use std::path::{Path, PathBuf};

use super::CliConfig;

pub(crate) const CONFIG_FILENAME: &str = ".devkit.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "devkit.toml";

/// Load CLI config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config() -> CliConfig {
    match find_config_file() {
        Some(path) => load_from(&path),
        None => CliConfig::default(),
    }
}

/// Load `path`, falling back to defaults when it cannot be read or parsed.
pub(crate) fn load_from(path: &Path) -> CliConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<CliConfig>(&contents) {
            Ok(mut config) => {
                tracing::debug!(?path, "Loaded CLI config");
                config.source = Some(path.to_path_buf());
                config
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                CliConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            CliConfig::default()
        }
    }
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    let home = dirs::home_dir()?;
    let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
    global.is_file().then_some(global)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.plugin_paths.is_empty());
        assert!(config.data_dir.is_none());
        assert!(config.disabled_plugins.is_empty());
        assert_eq!(config.report_days, 7);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
plugin-paths = ["./plugins", "~/contrib"]
data-dir = "/tmp/devkit-data"
disabled-plugins = ["notes"]
report-days = 30
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plugin_paths, vec!["./plugins", "~/contrib"]);
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/devkit-data"));
        assert_eq!(config.disabled_plugins, vec!["notes"]);
        assert_eq!(config.report_days, 30);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: CliConfig = toml::from_str("plugin-paths = [\"./plugins\"]").unwrap();
        assert_eq!(config.plugin_paths.len(), 1);
        assert_eq!(config.report_days, 7);
    }

    #[test]
    fn test_load_from_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "report-days = 14\n").unwrap();

        let config = load_from(&path);
        assert_eq!(config.report_days, 14);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "report-days = \"soon\"\n").unwrap();

        let config = load_from(&path);
        assert_eq!(config.report_days, 7);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_plugin_search_paths_expand_home() {
        let config = CliConfig {
            plugin_paths: vec!["~/plugins".to_string(), "/abs".to_string()],
            ..CliConfig::default()
        };
        let paths = config.plugin_search_paths();
        assert!(!paths[0].to_string_lossy().starts_with('~'));
        assert_eq!(paths[1], PathBuf::from("/abs"));
    }
}
