//! `devkit files`: junk file listing and removal.

use std::path::PathBuf;

use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use devkit_core::junk::{find_junk, remove_all};
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::{leaf_required, BUILTIN_VERSION};
use crate::output;

const SUBTREE: &str = "files";
const HELP: &str = "List or remove junk files.";

#[derive(Debug, Subcommand)]
enum FilesCommands {
    /// List junk files and folders (dry run unless --apply)
    Clean {
        /// Folder to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Actually delete files
        #[arg(long)]
        apply: bool,
    },
}

#[derive(Debug)]
pub(crate) struct FilesCleanPlugin {
    meta: PluginMeta,
}

impl FilesCleanPlugin {
    pub(crate) fn new() -> Self {
        Self {
            meta: PluginMeta::new(
                "files-clean",
                BUILTIN_VERSION,
                "Lists or removes common junk files and folders.",
            ),
        }
    }
}

impl ToolkitPlugin for FilesCleanPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = leaf_required(FilesCommands::augment_subcommands(Command::new(SUBTREE)));
        tree.attach(SUBTREE, HELP, subtree)?;
        Ok(())
    }

    fn execute(
        &self,
        _ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let FilesCommands::Clean { path, apply } = FilesCommands::from_arg_matches(matches)?;

        let found = find_junk(&path)?;
        if found.is_empty() {
            output::plain("No junk files found.");
            return Ok(Outcome::Success);
        }

        let action = if apply { "DELETE" } else { "FOUND " };
        for m in &found {
            output::plain(format!("{action} {}", m.display()));
        }

        if apply {
            let removed = remove_all(&found)?;
            output::success(format!("Removed {removed} item(s)."));
        } else {
            output::hint("Dry run only. Use --apply to delete.");
        }
        Ok(Outcome::Success)
    }
}
