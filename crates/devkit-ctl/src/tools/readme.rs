//! `devkit readme`: README presentation audit.

use std::path::PathBuf;

use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use devkit_core::audit::{all_passed, audit_readme, DEFAULT_MIN_SECTIONS};
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::{leaf_required, BUILTIN_VERSION};
use crate::output;

const SUBTREE: &str = "readme";
const HELP: &str = "Audit README presentation and completeness.";

#[derive(Debug, Subcommand)]
enum ReadmeCommands {
    /// Check a README and exit 2 if any check fails
    Check {
        /// Path to a README file.
        #[arg(default_value = "README.md")]
        path: PathBuf,
        /// Minimum recommended number of top-level sections.
        #[arg(long, default_value_t = DEFAULT_MIN_SECTIONS)]
        min_sections: usize,
    },
}

#[derive(Debug)]
pub(crate) struct ReadmeAuditorPlugin {
    meta: PluginMeta,
}

impl ReadmeAuditorPlugin {
    pub(crate) fn new() -> Self {
        Self {
            meta: PluginMeta::new(
                "readme-auditor",
                BUILTIN_VERSION,
                "Checks a README for common presentation gaps (headers, install, usage, license, screenshots).",
            ),
        }
    }
}

impl ToolkitPlugin for ReadmeAuditorPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = leaf_required(ReadmeCommands::augment_subcommands(Command::new(SUBTREE)));
        tree.attach(SUBTREE, HELP, subtree)?;
        Ok(())
    }

    fn execute(
        &self,
        _ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let ReadmeCommands::Check { path, min_sections } =
            ReadmeCommands::from_arg_matches(matches)?;

        if !path.exists() {
            return Err(PluginError::invalid_input(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        let checks = audit_readme(&text, min_sections);

        let mut table = output::Table::new(
            format!("README Audit: {}", path.display()),
            &["Check", "Result", "Notes"],
        );
        for check in &checks {
            let verdict = if check.passed { "OK" } else { "FAIL" };
            table.row([check.name, verdict, check.notes.as_str()]);
        }
        table.print();

        if all_passed(&checks) {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::ChecksFailed)
        }
    }
}
