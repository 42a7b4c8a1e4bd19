//! CLI-level error type.

use devkit_core::error::{EXIT_FAILURE, EXIT_USAGE};
use devkit_core::{PluginError, ToolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    #[must_use]
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Plugin(e) => e.exit_code(),
            Self::Tool(ToolError::PathNotFound(_)) | Self::Config(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
