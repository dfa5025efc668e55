//! CLI error type and exit-code mapping.

use crate::Exit;
use sentira_engine::AuditError;
use sentira_registry::RegistryError;
use sentira_store::StoreError;

/// An operation could not complete.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad arguments or tenant descriptor.
    #[error("configuration error: {0}")]
    Config(String),

    /// Registry failed to load.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The audit run failed or was cancelled.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Report or log persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Filesystem failure outside the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map the error to the process exit code.
    pub fn exit(&self) -> Exit {
        match self {
            Self::Config(_) | Self::Registry(_) | Self::Json(_) => Exit::ConfigError,
            Self::Audit(AuditError::RunCancelled) => Exit::Interrupted,
            Self::Audit(_) => Exit::ConfigError,
            Self::Store(_) | Self::Io(_) => Exit::IoError,
        }
    }
}
