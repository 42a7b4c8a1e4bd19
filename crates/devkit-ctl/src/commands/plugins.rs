//! `devkit plugins`: list the plugins that registered.

use devkit_core::PluginDispatcher;

use crate::cli_config::CliConfig;
use crate::output;

pub(crate) fn handle_plugins_command(dispatcher: &PluginDispatcher, cli_config: &CliConfig) {
    let mut plugins: Vec<_> = dispatcher.plugins().iter().map(|p| &p.meta).collect();

    if plugins.is_empty() {
        output::warning("No plugins found.");
        if !cli_config.disabled_plugins.is_empty() {
            output::blank();
            output::hint(format!(
                "Disabled in config: {}",
                cli_config.disabled_plugins.join(", ")
            ));
        }
        return;
    }

    plugins.sort_by_key(|meta| meta.sort_key());

    let mut table = output::Table::new("Plugins", &["Name", "Version", "Description"]);
    for meta in plugins {
        table.row([
            meta.name.as_str(),
            meta.version.as_str(),
            meta.description.as_str(),
        ]);
    }
    table.print();

    let problems = dispatcher.discovery_failures().len() + dispatcher.rejected().len();
    if problems > 0 {
        output::blank();
        output::hint(format!(
            "{problems} plugin(s) failed to load. Run `devkit doctor` for details."
        ));
    }
}
