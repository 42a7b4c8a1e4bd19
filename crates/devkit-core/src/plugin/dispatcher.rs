//! Plugin registration and dispatch.

use std::panic::{self, AssertUnwindSafe};

use clap::{ArgMatches, Command};

use super::discovery::{discover, panic_message, Discovery, DiscoveryFailure, LoadedPlugin};
use super::registry::ExtensionRegistry;
use super::tree::{CommandTree, SubtreeOwner};
use super::{Outcome, PluginContext};
use crate::error::PluginError;

/// A discovered plugin whose registration was rejected.
#[derive(Debug)]
pub struct RegistrationFailure {
    pub plugin: String,
    pub error: PluginError,
}

/// Owns the root command tree and the plugins that attached subtrees to it.
#[derive(Debug)]
pub struct PluginDispatcher {
    tree: CommandTree,
    plugins: Vec<LoadedPlugin>,
    discovery_failures: Vec<DiscoveryFailure>,
    rejected: Vec<RegistrationFailure>,
}

impl PluginDispatcher {
    /// Run discovery once against `registry` and register every plugin found.
    pub fn register(registry: &ExtensionRegistry, tree: CommandTree) -> Self {
        Self::register_discovered(discover(registry), tree)
    }

    /// Register plugins from an already completed discovery pass.
    ///
    /// Plugins register in discovery order, so when two plugins claim the same
    /// subcommand name the first one keeps it and the second is rejected whole.
    /// A plugin that panics while registering is rejected the same way.
    pub fn register_discovered(discovery: Discovery, mut tree: CommandTree) -> Self {
        let (candidates, discovery_failures) = discovery.into_parts();
        let mut plugins = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for loaded in candidates {
            let index = plugins.len();
            let registered =
                panic::catch_unwind(AssertUnwindSafe(|| loaded.plugin.register(&mut tree)))
                    .unwrap_or_else(|payload| {
                        Err(PluginError::Panicked(panic_message(payload.as_ref())))
                    });
            match registered {
                Ok(()) => {
                    let names = tree.commit(index);
                    tracing::debug!(plugin = %loaded.meta.name, subtrees = ?names, "Registered plugin");
                    plugins.push(loaded);
                }
                Err(error) => {
                    let dropped = tree.discard();
                    tracing::warn!(
                        plugin = %loaded.meta.name,
                        dropped,
                        error = %error,
                        "Skipping plugin: registration failed"
                    );
                    rejected.push(RegistrationFailure {
                        plugin: loaded.meta.name,
                        error,
                    });
                }
            }
        }

        Self {
            tree,
            plugins,
            discovery_failures,
            rejected,
        }
    }

    /// The root command with every plugin subtree attached.
    pub fn command(&self) -> Command {
        self.tree.command().clone()
    }

    /// Plugins that registered successfully.
    pub fn plugins(&self) -> &[LoadedPlugin] {
        &self.plugins
    }

    pub fn discovery_failures(&self) -> &[DiscoveryFailure] {
        &self.discovery_failures
    }

    pub fn rejected(&self) -> &[RegistrationFailure] {
        &self.rejected
    }

    /// Plugin that owns the top-level subcommand `name`, if any.
    pub fn owner(&self, name: &str) -> Option<&LoadedPlugin> {
        match self.tree.owner_of(name)? {
            SubtreeOwner::Plugin(index) => self.plugins.get(index),
            SubtreeOwner::Builtin => None,
        }
    }

    /// Route the selected subcommand to its plugin.
    ///
    /// Returns `Ok(None)` when no subcommand was given or it belongs to the host.
    pub fn dispatch(
        &self,
        ctx: &PluginContext,
        matches: &ArgMatches,
    ) -> Result<Option<Outcome>, PluginError> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Ok(None);
        };
        let Some(loaded) = self.owner(name) else {
            return Ok(None);
        };

        tracing::debug!(plugin = %loaded.meta.name, subtree = name, "Dispatching");
        loaded.plugin.execute(ctx, name, sub_matches).map(Some)
    }
}
