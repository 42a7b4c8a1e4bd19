//! `devkit notes`: local plain-text notes.

use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use devkit_core::notes::NotesStore;
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::{leaf_required, BUILTIN_VERSION};
use crate::output;

const SUBTREE: &str = "notes";
const HELP: &str = "Local plain-text notes.";

#[derive(Debug, Subcommand)]
enum NotesCommands {
    /// Append a note
    Add {
        /// Note text
        text: String,
    },
    /// Print every note
    List,
}

#[derive(Debug)]
pub(crate) struct NotesPlugin {
    meta: PluginMeta,
}

impl NotesPlugin {
    pub(crate) fn new() -> Self {
        Self {
            meta: PluginMeta::new("notes", BUILTIN_VERSION, "Very simple local text notes."),
        }
    }
}

impl ToolkitPlugin for NotesPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = leaf_required(NotesCommands::augment_subcommands(Command::new(SUBTREE)));
        tree.attach(SUBTREE, HELP, subtree)?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let store = NotesStore::in_data_dir(&ctx.data_dir);
        match NotesCommands::from_arg_matches(matches)? {
            NotesCommands::Add { text } => {
                store.add(&text)?;
                output::success("Note added.");
            }
            NotesCommands::List => match store.read()? {
                Some(contents) => output::plain(contents.trim_end()),
                None => output::plain("No notes yet."),
            },
        }
        Ok(Outcome::Success)
    }
}
