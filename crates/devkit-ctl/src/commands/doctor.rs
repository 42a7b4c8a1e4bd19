//! `devkit doctor`: paths, config and plugin load problems.

use std::path::Path;

use devkit_core::{PluginContext, PluginDispatcher};

use crate::cli_config::CliConfig;
use crate::output;

pub(crate) fn handle_doctor_command(
    dispatcher: &PluginDispatcher,
    cli_config: &CliConfig,
    ctx: &PluginContext,
) {
    output::header("devkit doctor");
    output::label("Data dir", ctx.data_dir.display());
    output::label("Writable", is_writable_dir(&ctx.data_dir));
    match &cli_config.source {
        Some(path) => output::label("Config", path.display()),
        None => output::label("Config", "(defaults)"),
    }
    if !cli_config.plugin_paths.is_empty() {
        output::label("Plugin paths", cli_config.plugin_paths.join(", "));
    }
    if !cli_config.disabled_plugins.is_empty() {
        output::label("Disabled", cli_config.disabled_plugins.join(", "));
    }
    output::label("Plugins loaded", dispatcher.plugins().len());

    output::blank();
    let failures = dispatcher.discovery_failures();
    let rejected = dispatcher.rejected();
    if failures.is_empty() && rejected.is_empty() {
        output::status_icon(true, "All plugins loaded");
        return;
    }

    for failure in failures {
        output::status_icon(false, format!("{}: {}", failure.entry, failure.error));
    }
    for rejection in rejected {
        output::status_icon(
            false,
            format!("{} rejected: {}", rejection.plugin, rejection.error),
        );
    }
}

fn is_writable_dir(dir: &Path) -> bool {
    std::fs::metadata(dir).is_ok_and(|meta| meta.is_dir() && !meta.permissions().readonly())
}
