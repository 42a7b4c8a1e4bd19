//! Manifest plugin discovery and registration.
//!
//! Directories holding a `devkit-plugin.toml` are found under the configured
//! plugin paths and advertised to the extension registry as factories. Reading
//! the manifest happens inside the factory, so a broken manifest surfaces as a
//! discovery failure instead of aborting startup.

mod discovery;
mod external;
mod manifest;

use std::path::PathBuf;
use std::sync::Arc;

use devkit_core::{ExtensionRegistry, PluginError, ToolkitPlugin, PLUGIN_GROUP};

pub(crate) use external::DATA_DIR_ENV;

use discovery::discover_plugin_dirs;
use external::ExternalPlugin;
use manifest::PluginManifest;

/// Register a factory for every manifest plugin found under `search_paths`.
///
/// Returns the number of entries added.
pub(crate) fn register_manifest_plugins(
    registry: &mut ExtensionRegistry,
    search_paths: &[PathBuf],
) -> usize {
    let dirs = discover_plugin_dirs(search_paths);
    for dir in &dirs {
        let entry = format!("manifest:{}", dir.display());
        let dir = dir.clone();
        registry.register_factory(PLUGIN_GROUP, entry, move || {
            let manifest =
                PluginManifest::load(&dir).map_err(|e| PluginError::factory(e.to_string()))?;
            let plugin: Arc<dyn ToolkitPlugin> =
                Arc::new(ExternalPlugin::from_manifest(&manifest, &dir));
            Ok(plugin)
        });
    }
    tracing::debug!(count = dirs.len(), "Registered manifest plugins");
    dirs.len()
}
