//! `devkit init` command: bootstrap a `.devkit.toml` with sensible defaults.

use std::path::Path;

use askama::Template;

use crate::cli_config::loader::CONFIG_FILENAME;
use crate::error::{CliError, CliResult};
use crate::output;

/// Askama template for generating `.devkit.toml`.
#[derive(Template, Debug)]
#[template(path = "init-config.toml", escape = "none")]
struct InitConfigTemplate {
    /// TOML-quoted plugin paths.
    plugin_paths: Vec<String>,
    report_days: u32,
}

impl InitConfigTemplate {
    fn new(plugin_paths: &[String], report_days: u32) -> Self {
        Self {
            plugin_paths: plugin_paths
                .iter()
                .map(|p| toml::Value::String(p.clone()).to_string())
                .collect(),
            report_days,
        }
    }
}

pub(crate) fn handle_init_command(plugin_paths: &[String], report_days: u32) -> CliResult<()> {
    write_config(Path::new(CONFIG_FILENAME), plugin_paths, report_days)?;

    output::success(format!("Created {CONFIG_FILENAME}"));
    output::blank();
    output::hint("Next steps:");
    output::plain("  devkit plugins                # List installed plugins");
    output::plain("  devkit doctor                 # Check paths and plugin health");
    Ok(())
}

fn write_config(path: &Path, plugin_paths: &[String], report_days: u32) -> CliResult<()> {
    if path.exists() {
        output::warning(format!("{} already exists.", path.display()));
        output::hint("Remove it first if you want to reinitialize.");
        return Err(CliError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = InitConfigTemplate::new(plugin_paths, report_days).render()?;
    std::fs::write(path, content)?;
    tracing::debug!(?path, "Wrote CLI config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_config::CliConfig;

    #[test]
    fn test_rendered_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let paths = vec!["./plugins".to_string(), "C:\\tools \"x\"".to_string()];

        write_config(&path, &paths, 14).unwrap();

        let config: CliConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.plugin_paths, paths);
        assert_eq!(config.report_days, 14);
        assert!(config.data_dir.is_none());
        assert!(config.disabled_plugins.is_empty());
    }

    #[test]
    fn test_default_render_has_no_plugin_paths() {
        let rendered = InitConfigTemplate::new(&[], 7).render().unwrap();
        let config: CliConfig = toml::from_str(&rendered).unwrap();
        assert!(config.plugin_paths.is_empty());
        assert_eq!(config.report_days, 7);
        assert!(rendered.contains("# plugin-paths"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "report-days = 3\n").unwrap();

        let err = write_config(&path, &[], 7).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "report-days = 3\n");
    }
}
