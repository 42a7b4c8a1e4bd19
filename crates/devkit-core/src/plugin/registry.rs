//! Extension registry: group name → ordered list of plugin entries.
//!
//! Installed plugins are registered here explicitly by the host binary instead
//! of being looked up from ambient process state, so tests can build a registry
//! with fake entries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::ToolkitPlugin;
use crate::error::PluginError;

/// Group under which toolkit plugins advertise themselves.
pub const PLUGIN_GROUP: &str = "devkit.plugins";

/// Constructor for a plugin instance, invoked once per discovery pass.
pub type PluginFactory = Box<dyn Fn() -> Result<Arc<dyn ToolkitPlugin>, PluginError>>;

/// A single loadable registry entry.
pub enum ExtensionEntry {
    /// Invoked with no arguments to obtain the plugin.
    Factory { name: String, factory: PluginFactory },
    /// A ready-made plugin value, used as is.
    Instance {
        name: String,
        plugin: Arc<dyn ToolkitPlugin>,
    },
}

impl ExtensionEntry {
    /// Entry identifier (not the plugin name, which is only known after loading).
    pub fn name(&self) -> &str {
        match self {
            Self::Factory { name, .. } | Self::Instance { name, .. } => name,
        }
    }
}

impl fmt::Debug for ExtensionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory { name, .. } => f.debug_struct("Factory").field("name", name).finish(),
            Self::Instance { name, plugin } => f
                .debug_struct("Instance")
                .field("name", name)
                .field("meta", plugin.meta())
                .finish(),
        }
    }
}

/// Registry of extension entries grouped by extension-point name.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    groups: BTreeMap<String, Vec<ExtensionEntry>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory entry to `group`.
    pub fn register_factory<F>(&mut self, group: &str, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn ToolkitPlugin>, PluginError> + 'static,
    {
        self.push(
            group,
            ExtensionEntry::Factory {
                name: name.into(),
                factory: Box::new(factory),
            },
        );
    }

    /// Add a ready-made plugin to `group`.
    pub fn register_instance(
        &mut self,
        group: &str,
        name: impl Into<String>,
        plugin: Arc<dyn ToolkitPlugin>,
    ) {
        self.push(
            group,
            ExtensionEntry::Instance {
                name: name.into(),
                plugin,
            },
        );
    }

    /// Entries registered under `group`, in registration order.
    pub fn entries(&self, group: &str) -> &[ExtensionEntry] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of entries across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, group: &str, entry: ExtensionEntry) {
        tracing::debug!(group, entry = entry.name(), "Registered extension entry");
        self.groups.entry(group.to_string()).or_default().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::test_support::StubPlugin;

    #[test]
    fn test_registry_empty_by_default() {
        let registry = ExtensionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.entries(PLUGIN_GROUP).is_empty());
    }

    #[test]
    fn test_entries_keep_registration_order() {
        let mut registry = ExtensionRegistry::new();
        registry.register_factory(PLUGIN_GROUP, "zeta", || Ok(StubPlugin::arc("zeta", "z")));
        registry.register_instance(PLUGIN_GROUP, "alpha", StubPlugin::arc("alpha", "a"));

        let names: Vec<&str> = registry
            .entries(PLUGIN_GROUP)
            .iter()
            .map(ExtensionEntry::name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_groups_are_separate() {
        let mut registry = ExtensionRegistry::new();
        registry.register_instance("other.group", "alpha", StubPlugin::arc("alpha", "a"));

        assert!(registry.entries(PLUGIN_GROUP).is_empty());
        assert_eq!(registry.entries("other.group").len(), 1);
    }
}
