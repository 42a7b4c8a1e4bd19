//! Plugin metadata.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Immutable descriptor attached to every plugin.
///
/// `name` is the display and sort key. It is not required to be unique; the
/// command tree enforces uniqueness of subcommand names instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PluginMeta {
    /// Plugin name (e.g., "time-tracker", "readme-auditor").
    #[validate(length(min = 1, message = "plugin name is empty"))]
    pub name: String,

    /// Plugin version.
    #[validate(length(min = 1, message = "plugin version is empty"))]
    pub version: String,

    /// Human-readable description.
    pub description: String,
}

impl PluginMeta {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    /// Key used when listing plugins.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}
