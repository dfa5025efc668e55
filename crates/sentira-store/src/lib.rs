//! Filesystem persistence for audit reports and the remediation log.
//!
//! Reports are stored as immutable units keyed by `(tenant, run timestamp)`;
//! the remediation log is a separate append-only sequence keyed by tenant.

mod remediation_log;
mod report_store;

pub use remediation_log::{LogEntry, RemediationLog};
pub use report_store::ReportStore;

/// Persistence failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Report or log entry could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A report with the same key already exists; stored reports are
    /// immutable and never overwritten.
    #[error("report already exists for tenant '{tenant}' at {run_timestamp}")]
    AlreadyExists {
        /// Tenant key.
        tenant: String,
        /// Run timestamp key.
        run_timestamp: String,
    },
    /// No report stored under the requested key.
    #[error("no report for tenant '{tenant}' at {run_timestamp}")]
    NotFound {
        /// Tenant key.
        tenant: String,
        /// Run timestamp key.
        run_timestamp: String,
    },
}
