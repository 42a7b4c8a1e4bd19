//! # Error Types
//!
//! One error enum per concern. Plugin-facing code returns [`PluginError`], which
//! absorbs the store and tool errors so a plugin handler can use `?` throughout.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for failed checks, conflicts and bad user input.
pub const EXIT_USAGE: u8 = 2;

/// Exit code for everything else that went wrong.
pub const EXIT_FAILURE: u8 = 1;

/// Errors raised while attaching a plugin's subtree to the command tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("subcommand '{name}' is already registered")]
    DuplicateSubtree { name: String },

    #[error("subcommand name '{name}' is not usable")]
    InvalidName { name: String },
}

/// Session store failures. Corrupted content is not an error (it loads as empty).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize session document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of the filesystem utilities (audit, hygiene, junk, notes).
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl ToolError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by plugins: at discovery, at registration, or while running.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin factory failed: {0}")]
    Factory(String),

    #[error("plugin factory panicked: {0}")]
    Panicked(String),

    #[error("invalid plugin metadata: {0}")]
    InvalidMeta(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("argument error: {0}")]
    Arguments(#[from] clap::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginError {
    /// Create a factory error
    pub fn factory(message: impl Into<String>) -> Self {
        Self::Factory(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Process exit code for this error when it reaches the command boundary.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) | Self::Arguments(_) => EXIT_USAGE,
            Self::Tool(ToolError::PathNotFound(_)) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
