//! Built-in plugins shipped with the `devkit` binary.
//!
//! They go through the same extension registry, discovery and dispatch path as
//! manifest plugins; the only difference is that the host registers them.

mod files;
mod notes;
mod readme;
mod repo;
mod time;

use std::sync::Arc;

use devkit_core::{ExtensionRegistry, ToolkitPlugin, PLUGIN_GROUP};

use crate::cli_config::CliConfig;

use files::FilesCleanPlugin;
use notes::NotesPlugin;
use readme::ReadmeAuditorPlugin;
use repo::RepoCheckPlugin;
use time::TimeTrackerPlugin;

/// Version reported by every built-in plugin.
const BUILTIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Advertise the built-in plugins under [`PLUGIN_GROUP`].
pub(crate) fn register_builtins(registry: &mut ExtensionRegistry, config: &CliConfig) {
    registry.register_instance(PLUGIN_GROUP, "files-clean", Arc::new(FilesCleanPlugin::new()));
    registry.register_instance(PLUGIN_GROUP, "notes", Arc::new(NotesPlugin::new()));
    registry.register_instance(
        PLUGIN_GROUP,
        "readme-auditor",
        Arc::new(ReadmeAuditorPlugin::new()),
    );
    registry.register_instance(PLUGIN_GROUP, "repo-check", Arc::new(RepoCheckPlugin::new()));

    let report_days = config.report_days;
    registry.register_factory(PLUGIN_GROUP, "time-tracker", move || {
        let plugin: Arc<dyn ToolkitPlugin> = Arc::new(TimeTrackerPlugin::new(report_days));
        Ok(plugin)
    });
}

/// Attach `subtree` with required leaves, so a bare `devkit <subtree>` prints help.
fn leaf_required(subtree: clap::Command) -> clap::Command {
    subtree
        .subcommand_required(true)
        .arg_required_else_help(true)
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;
    use devkit_core::{CommandTree, PluginDispatcher};

    #[test]
    fn test_builtins_register_without_conflicts() {
        let mut registry = ExtensionRegistry::new();
        register_builtins(&mut registry, &CliConfig::default());
        assert_eq!(registry.entries(PLUGIN_GROUP).len(), 5);

        let dispatcher =
            PluginDispatcher::register(&registry, CommandTree::new(Command::new("devkit")));
        assert!(dispatcher.rejected().is_empty());
        assert!(dispatcher.discovery_failures().is_empty());

        let command = dispatcher.command();
        for name in ["files", "notes", "readme", "repo", "time"] {
            assert!(command.find_subcommand(name).is_some(), "missing {name}");
        }
        let names: Vec<&str> = dispatcher
            .plugins()
            .iter()
            .map(|p| p.meta.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["files-clean", "notes", "readme-auditor", "repo-check", "time-tracker"]
        );
    }
}
