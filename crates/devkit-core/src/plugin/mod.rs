//! Plugin contract, extension registry, discovery and dispatch.
//!
//! Plugins are advertised to an explicit [`ExtensionRegistry`] under the
//! [`PLUGIN_GROUP`] group. [`discover`] instantiates every entry, keeping only
//! those with valid metadata, and [`PluginDispatcher::register`] lets each plugin
//! attach its subtree to the root [`CommandTree`]. One broken plugin never takes
//! the rest of the CLI down: failures are logged and recorded, not propagated.

mod discovery;
mod dispatcher;
mod meta;
mod registry;
mod tree;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::PathBuf;

use clap::ArgMatches;

use crate::error::{PluginError, EXIT_USAGE};

pub use discovery::{discover, Discovery, DiscoveryFailure, LoadedPlugin};
pub use dispatcher::{PluginDispatcher, RegistrationFailure};
pub use meta::PluginMeta;
pub use registry::{ExtensionEntry, ExtensionRegistry, PluginFactory, PLUGIN_GROUP};
pub use tree::{CommandTree, SubtreeOwner};

/// The capability every plugin provides.
pub trait ToolkitPlugin {
    /// Descriptor shown by `devkit plugins`.
    fn meta(&self) -> &PluginMeta;

    /// Attach this plugin's subtree(s) to the root command tree.
    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError>;

    /// Run the subtree `subtree` that this plugin attached, with its parsed arguments.
    fn execute(
        &self,
        ctx: &PluginContext,
        subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError>;
}

/// Per-invocation state handed to plugin handlers.
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Directory where plugins keep their state (created before dispatch).
    pub data_dir: PathBuf,
}

impl PluginContext {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

/// Result of a successfully executed command, mapped to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The requested state transition conflicts with the current state.
    Conflict,
    /// The command ran but at least one check failed.
    ChecksFailed,
    /// Exit status reported by an external program.
    Exited(i32),
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Conflict | Self::ChecksFailed => EXIT_USAGE,
            Self::Exited(code) => u8::try_from(code).unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Success.exit_code(), 0);
        assert_eq!(Outcome::Conflict.exit_code(), 2);
        assert_eq!(Outcome::ChecksFailed.exit_code(), 2);
        assert_eq!(Outcome::Exited(3).exit_code(), 3);
        assert_eq!(Outcome::Exited(-1).exit_code(), 1);
        assert_eq!(Outcome::Exited(300).exit_code(), 1);
    }
}
