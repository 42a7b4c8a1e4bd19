//! devkit: a modular CLI with small, practical tools.
//!
//! The binary owns a handful of root commands (`version`, `plugins`, `doctor`,
//! `init`). Every other subcommand is attached at startup by a plugin: the
//! built-ins in [`tools`] and any manifest plugins found under the configured
//! plugin paths.

mod cli_config;
mod commands;
mod error;
mod output;
mod plugins;
mod tools;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, ArgMatches, Args, Command, FromArgMatches, Subcommand};
use devkit_core::paths::{ensure_dir, expand_home, user_data_dir, APP_NAME};
use devkit_core::{
    discover, CommandTree, ExtensionRegistry, PluginContext, PluginDispatcher, PluginError,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::cli_config::CliConfig;
use crate::error::CliResult;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "DEVKIT_LOG";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Options accepted anywhere on the command line.
#[derive(Debug, Args)]
struct GlobalArgs {
    /// Override the user data directory (where toolkit modules can store state).
    #[arg(long, global = true, env = plugins::DATA_DIR_ENV, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). DEVKIT_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum CoreCommands {
    /// Print the toolkit version
    Version,
    /// List installed plugins
    Plugins,
    /// Basic sanity checks and paths
    Doctor,
    /// Write a starter .devkit.toml in the current directory
    Init {
        /// Plugin search path to include (repeatable)
        #[arg(long = "plugin-path", value_name = "PATH")]
        plugin_paths: Vec<String>,

        /// Default lookback window for `devkit time report`
        #[arg(long)]
        report_days: Option<u32>,
    },
}

fn main() -> ExitCode {
    let log_handle = init_tracing();
    let cli_config = cli_config::load_cli_config();
    let dispatcher = build_dispatcher(&cli_config);

    let matches = dispatcher.command().get_matches();
    let globals = GlobalArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    apply_verbosity(&log_handle, globals.verbose);

    match run(&dispatcher, &cli_config, &globals, &matches) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn root_command() -> Command {
    let root = Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("devkit: a modular CLI with small, practical tools.")
        .styles(output::clap_styles())
        .subcommand_required(true)
        .arg_required_else_help(true);
    CoreCommands::augment_subcommands(GlobalArgs::augment_args(root))
}

/// Advertise, discover and register every plugin against the root command.
fn build_dispatcher(cli_config: &CliConfig) -> PluginDispatcher {
    let mut registry = ExtensionRegistry::new();
    tools::register_builtins(&mut registry, cli_config);
    plugins::register_manifest_plugins(&mut registry, &cli_config.plugin_search_paths());

    let mut discovery = discover(&registry);
    discovery.retain_enabled(&cli_config.disabled_plugins);
    PluginDispatcher::register_discovered(discovery, CommandTree::new(root_command()))
}

fn run(
    dispatcher: &PluginDispatcher,
    cli_config: &CliConfig,
    globals: &GlobalArgs,
    matches: &ArgMatches,
) -> CliResult<u8> {
    let data_dir = resolve_data_dir(globals.data_dir.as_deref(), cli_config);
    ensure_dir(&data_dir)?;
    let ctx = PluginContext::new(data_dir);

    if let Some(outcome) = dispatcher.dispatch(&ctx, matches)? {
        return Ok(outcome.exit_code());
    }

    match CoreCommands::from_arg_matches(matches).map_err(PluginError::from)? {
        CoreCommands::Version => commands::handle_version_command(),
        CoreCommands::Plugins => commands::handle_plugins_command(dispatcher, cli_config),
        CoreCommands::Doctor => commands::handle_doctor_command(dispatcher, cli_config, &ctx),
        CoreCommands::Init {
            plugin_paths,
            report_days,
        } => commands::handle_init_command(
            &plugin_paths,
            report_days.unwrap_or(cli_config.report_days),
        )?,
    }
    Ok(0)
}

/// `--data-dir`, then config `data-dir`, then the per-user data directory.
fn resolve_data_dir(flag: Option<&Path>, cli_config: &CliConfig) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    match &cli_config.data_dir {
        Some(dir) => expand_home(dir),
        None => user_data_dir(APP_NAME),
    }
}

/// Install the stderr subscriber. The filter comes from `DEVKIT_LOG`, else `warn`,
/// and can be raised once `-v` has been parsed.
fn init_tracing() -> FilterHandle {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    handle
}

fn apply_verbosity(handle: &FilterHandle, verbose: u8) {
    if verbose == 0 || std::env::var_os(LOG_ENV).is_some() {
        return;
    }
    let level = if verbose == 1 { "info" } else { "debug" };
    if let Err(e) = handle.reload(EnvFilter::new(level)) {
        tracing::debug!(error = %e, "Failed to raise log level");
    }
}
