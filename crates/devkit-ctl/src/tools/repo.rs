//! `devkit repo`: repository hygiene checks.

use std::path::PathBuf;

use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use devkit_core::hygiene::check_repository;
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::{leaf_required, BUILTIN_VERSION};
use crate::output;

const SUBTREE: &str = "repo";
const HELP: &str = "Basic repository hygiene checks.";

#[derive(Debug, Subcommand)]
enum RepoCommands {
    /// Check a repository folder (findings are warnings only)
    Check {
        /// Repository root
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug)]
pub(crate) struct RepoCheckPlugin {
    meta: PluginMeta,
}

impl RepoCheckPlugin {
    pub(crate) fn new() -> Self {
        Self {
            meta: PluginMeta::new(
                "repo-check",
                BUILTIN_VERSION,
                "Checks a repository folder for basic hygiene issues.",
            ),
        }
    }
}

impl ToolkitPlugin for RepoCheckPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = leaf_required(RepoCommands::augment_subcommands(Command::new(SUBTREE)));
        tree.attach(SUBTREE, HELP, subtree)?;
        Ok(())
    }

    fn execute(
        &self,
        _ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let RepoCommands::Check { path } = RepoCommands::from_arg_matches(matches)?;

        let checks = check_repository(&path)?;
        let resolved = std::fs::canonicalize(&path).unwrap_or(path);

        let mut table = output::Table::new(
            format!("Repository check: {}", resolved.display()),
            &["Check", "Result", "Notes"],
        );
        for check in checks {
            let verdict = if check.ok { "OK" } else { "WARN" };
            table.row([check.name, verdict.to_string(), check.notes]);
        }
        table.print();

        Ok(Outcome::Success)
    }
}
