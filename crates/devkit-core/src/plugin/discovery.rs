//! Plugin discovery: instantiate every registry entry in the plugin group.
//!
//! Each entry is loaded in isolation. A factory that errors or panics, or a
//! plugin with invalid metadata, is dropped with a warning and recorded as a
//! [`DiscoveryFailure`]; discovery itself never fails.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use validator::Validate;

use super::registry::{ExtensionEntry, ExtensionRegistry, PLUGIN_GROUP};
use super::{PluginMeta, ToolkitPlugin};
use crate::error::PluginError;

/// A discovered plugin together with a snapshot of its metadata.
#[derive(Clone)]
pub struct LoadedPlugin {
    pub meta: PluginMeta,
    pub plugin: Arc<dyn ToolkitPlugin>,
}

impl fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// A registry entry that could not be loaded.
#[derive(Debug)]
pub struct DiscoveryFailure {
    /// Registry entry name.
    pub entry: String,
    pub error: PluginError,
}

/// Outcome of one discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    plugins: Vec<LoadedPlugin>,
    failures: Vec<DiscoveryFailure>,
}

impl Discovery {
    /// Plugins that loaded, in registry order.
    pub fn plugins(&self) -> &[LoadedPlugin] {
        &self.plugins
    }

    pub fn failures(&self) -> &[DiscoveryFailure] {
        &self.failures
    }

    /// Drop plugins whose name appears in `disabled` (case-insensitive).
    pub fn retain_enabled(&mut self, disabled: &[String]) {
        if disabled.is_empty() {
            return;
        }
        self.plugins.retain(|lp| {
            let keep = !disabled
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&lp.meta.name));
            if !keep {
                tracing::debug!(name = %lp.meta.name, "Plugin disabled by configuration");
            }
            keep
        });
    }

    pub(crate) fn into_parts(self) -> (Vec<LoadedPlugin>, Vec<DiscoveryFailure>) {
        (self.plugins, self.failures)
    }
}

/// Load every entry of the [`PLUGIN_GROUP`] group in `registry`.
pub fn discover(registry: &ExtensionRegistry) -> Discovery {
    let mut discovery = Discovery::default();

    for entry in registry.entries(PLUGIN_GROUP) {
        match load_entry(entry) {
            Ok(loaded) => {
                tracing::debug!(
                    entry = entry.name(),
                    name = %loaded.meta.name,
                    version = %loaded.meta.version,
                    "Discovered plugin"
                );
                discovery.plugins.push(loaded);
            }
            Err(error) => {
                tracing::warn!(entry = entry.name(), error = %error, "Skipping plugin");
                discovery.failures.push(DiscoveryFailure {
                    entry: entry.name().to_string(),
                    error,
                });
            }
        }
    }

    discovery
}

fn load_entry(entry: &ExtensionEntry) -> Result<LoadedPlugin, PluginError> {
    let plugin = match entry {
        ExtensionEntry::Factory { factory, .. } => {
            panic::catch_unwind(AssertUnwindSafe(factory))
                .map_err(|payload| PluginError::Panicked(panic_message(payload.as_ref())))??
        }
        ExtensionEntry::Instance { plugin, .. } => Arc::clone(plugin),
    };

    let meta = plugin.meta().clone();
    meta.validate()?;

    Ok(LoadedPlugin { meta, plugin })
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::test_support::StubPlugin;

    #[test]
    fn test_discover_factories_and_instances() {
        let mut registry = ExtensionRegistry::new();
        registry.register_factory(PLUGIN_GROUP, "notes", || Ok(StubPlugin::arc("notes", "notes")));
        registry.register_instance(PLUGIN_GROUP, "repo", StubPlugin::arc("repo-check", "repo"));

        let discovery = discover(&registry);
        let names: Vec<&str> = discovery
            .plugins()
            .iter()
            .map(|lp| lp.meta.name.as_str())
            .collect();
        assert_eq!(names, vec!["notes", "repo-check"]);
        assert!(discovery.failures().is_empty());
    }

    #[test]
    fn test_failing_factory_is_isolated() {
        let mut registry = ExtensionRegistry::new();
        registry.register_factory(PLUGIN_GROUP, "good-a", || Ok(StubPlugin::arc("a", "a")));
        registry.register_factory(PLUGIN_GROUP, "broken", || {
            Err(PluginError::factory("missing dependency"))
        });
        registry.register_factory(PLUGIN_GROUP, "good-b", || Ok(StubPlugin::arc("b", "b")));

        let discovery = discover(&registry);
        assert_eq!(discovery.plugins().len(), 2);
        assert_eq!(discovery.failures().len(), 1);
        assert_eq!(discovery.failures()[0].entry, "broken");
        assert!(matches!(
            discovery.failures()[0].error,
            PluginError::Factory(_)
        ));
    }

    #[test]
    fn test_panicking_factory_is_isolated() {
        let mut registry = ExtensionRegistry::new();
        registry.register_factory(PLUGIN_GROUP, "panics", || panic!("boom"));
        registry.register_factory(PLUGIN_GROUP, "good", || Ok(StubPlugin::arc("good", "good")));

        let discovery = discover(&registry);
        assert_eq!(discovery.plugins().len(), 1);
        assert_eq!(discovery.plugins()[0].meta.name, "good");
        match &discovery.failures()[0].error {
            PluginError::Panicked(msg) => assert_eq!(msg, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_meta_skipped() {
        let mut registry = ExtensionRegistry::new();
        registry.register_instance(PLUGIN_GROUP, "nameless", StubPlugin::arc("", "x"));
        registry.register_instance(PLUGIN_GROUP, "fine", StubPlugin::arc("fine", "fine"));

        let discovery = discover(&registry);
        assert_eq!(discovery.plugins().len(), 1);
        assert!(matches!(
            discovery.failures()[0].error,
            PluginError::InvalidMeta(_)
        ));
    }

    #[test]
    fn test_other_groups_ignored() {
        let mut registry = ExtensionRegistry::new();
        registry.register_instance("unrelated.group", "x", StubPlugin::arc("x", "x"));

        let discovery = discover(&registry);
        assert!(discovery.plugins().is_empty());
        assert!(discovery.failures().is_empty());
    }

    #[test]
    fn test_retain_enabled() {
        let mut registry = ExtensionRegistry::new();
        registry.register_instance(PLUGIN_GROUP, "notes", StubPlugin::arc("notes", "notes"));
        registry.register_instance(PLUGIN_GROUP, "time", StubPlugin::arc("time-tracker", "time"));

        let mut discovery = discover(&registry);
        discovery.retain_enabled(&["Notes".to_string()]);
        assert_eq!(discovery.plugins().len(), 1);
        assert_eq!(discovery.plugins()[0].meta.name, "time-tracker");
    }
}
