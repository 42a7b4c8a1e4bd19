//! CLI configuration for plugin paths and data-dir preferences.
//!
//! Read from `.devkit.toml`; every key is optional.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::PathBuf;

use devkit_core::timetrack::DEFAULT_REPORT_DAYS;
use serde::Deserialize;

fn default_report_days() -> u32 {
    DEFAULT_REPORT_DAYS
}

/// CLI configuration for plugin discovery and built-in tool defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Paths to scan for manifest plugins (`devkit-plugin.toml`).
    #[serde(default)]
    pub plugin_paths: Vec<String>,

    /// Overrides the per-user data directory. `~/` is expanded.
    pub data_dir: Option<String>,

    /// Plugin names skipped at discovery (case-insensitive).
    #[serde(default)]
    pub disabled_plugins: Vec<String>,

    /// Default window for `devkit time report`. Default: 7.
    #[serde(default = "default_report_days")]
    pub report_days: u32,

    /// File this config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            plugin_paths: Vec::new(),
            data_dir: None,
            disabled_plugins: Vec::new(),
            report_days: DEFAULT_REPORT_DAYS,
            source: None,
        }
    }
}

impl CliConfig {
    /// Plugin search paths with `~/` expanded.
    pub(crate) fn plugin_search_paths(&self) -> Vec<PathBuf> {
        self.plugin_paths
            .iter()
            .map(|p| devkit_core::paths::expand_home(p))
            .collect()
    }
}
