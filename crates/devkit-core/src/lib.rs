//! # devkit-core
//!
//! Library half of the `devkit` toolkit.
//!
//! - [`plugin`]: the plugin contract, the explicit extension registry, discovery
//!   and the command-tree dispatcher that routes parsed arguments to plugins.
//! - [`timetrack`]: the session store behind `devkit time`.
//! - [`audit`], [`hygiene`], [`junk`], [`notes`]: the small utilities shipped as
//!   built-in plugins.
//! - [`paths`]: per-user data directory resolution.

pub mod audit;
pub mod error;
pub mod hygiene;
pub mod junk;
pub mod notes;
pub mod paths;
pub mod plugin;
pub mod timetrack;

pub use error::{PluginError, RegistrationError, StoreError, ToolError};
pub use plugin::{
    discover, CommandTree, Discovery, DiscoveryFailure, ExtensionEntry, ExtensionRegistry,
    LoadedPlugin, Outcome, PluginContext, PluginDispatcher, PluginMeta, ToolkitPlugin,
    PLUGIN_GROUP,
};
