//! The control interface.

use async_trait::async_trait;
use sentira_connect::{ConnectionSet, ServiceUnavailable};
use sentira_types::{CheckOutcome, Severity};

/// A check (or fix) could not run to completion.
///
/// Message formats follow the `<kind>: <detail>` convention so the text can
/// be placed verbatim into a Manual result's evidence field.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// A service the control depends on is unavailable.
    #[error("ServiceUnavailable: {0}")]
    Service(#[from] ServiceUnavailable),
    /// The check ran but could not produce a determination.
    #[error("CheckFailed: {0}")]
    Failed(String),
    /// The control intentionally defers this check to human review.
    #[error("ManualReview: {0}")]
    DeferToReview(String),
    /// The control has no automated fix.
    #[error("NotRemediable: control has no automated fix")]
    NotRemediable,
}

impl CheckError {
    /// Shorthand for a failed check.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// A single, named compliance check against tenant configuration.
///
/// Checks are pure with respect to the engine: they may perform I/O against
/// external services through the [`ConnectionSet`] but never mutate engine
/// state. Remediation hooks are optional; the default implementation reports
/// the control as not remediable.
#[async_trait]
pub trait Control: Send + Sync {
    /// Stable identifier, unique across the registry (e.g. "1.1.1").
    fn id(&self) -> &str;

    /// Human-readable title.
    fn title(&self) -> &str;

    /// Grouping category (e.g. "Identity", "Audit Logging").
    fn category(&self) -> &str;

    /// Severity of a failure of this control.
    fn severity(&self) -> Severity;

    /// Whether an automated fix exists.
    fn remediable(&self) -> bool {
        false
    }

    /// Whether the fix can be reverted after a failed verification.
    fn supports_rollback(&self) -> bool {
        false
    }

    /// Evaluate the control against the connected services.
    async fn check(&self, connections: &ConnectionSet) -> Result<CheckOutcome, CheckError>;

    /// Describe the change `apply_fix` would make, without making it.
    async fn preview_fix(&self, connections: &ConnectionSet) -> Result<String, CheckError> {
        let _ = connections;
        Err(CheckError::NotRemediable)
    }

    /// Make the real change on the external system.
    async fn apply_fix(&self, connections: &ConnectionSet) -> Result<(), CheckError> {
        let _ = connections;
        Err(CheckError::NotRemediable)
    }

    /// Revert the change made by `apply_fix`.
    async fn rollback_fix(&self, connections: &ConnectionSet) -> Result<(), CheckError> {
        let _ = connections;
        Err(CheckError::failed("rollback not supported"))
    }
}
