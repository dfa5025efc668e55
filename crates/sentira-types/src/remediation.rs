//! Remediation attempt records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a remediation attempt for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationStatus {
    /// The change was described without being made (dry run).
    Previewed,
    /// An approval gate cleared the control for a real apply.
    Approved,
    /// The change was made but not yet verified.
    Applied,
    /// The change was made and the post-apply check passed.
    Verified,
    /// The attempt failed (not remediable, approval missing, apply error,
    /// or post-apply verification failure).
    Failed,
    /// The change was reverted after verification failed.
    RolledBack,
}

impl fmt::Display for RemediationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previewed => write!(f, "Previewed"),
            Self::Approved => write!(f, "Approved"),
            Self::Applied => write!(f, "Applied"),
            Self::Verified => write!(f, "Verified"),
            Self::Failed => write!(f, "Failed"),
            Self::RolledBack => write!(f, "RolledBack"),
        }
    }
}

/// The record of one remediation attempt against one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationAction {
    /// Control the attempt targeted.
    pub control_id: String,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Final state of the attempt.
    pub status: RemediationStatus,
    /// Error detail when the attempt failed.
    pub error: Option<String>,
    /// When the change was applied, for real applies that got that far.
    pub applied_at: Option<DateTime<Utc>>,
}

impl RemediationAction {
    /// Record a failed attempt.
    pub fn failed(control_id: impl Into<String>, dry_run: bool, error: impl Into<String>) -> Self {
        Self {
            control_id: control_id.into(),
            dry_run,
            status: RemediationStatus::Failed,
            error: Some(error.into()),
            applied_at: None,
        }
    }
}
