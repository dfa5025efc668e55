//! Per-control evaluation record.

use crate::{CheckOutcome, ControlStatus, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The standardized record produced for one control in one audit run.
///
/// Title and severity are copied from the control definition at evaluation
/// time so that later edits to the registry cannot corrupt stored history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    /// Stable control identifier (e.g. "1.1.1").
    pub control_id: String,
    /// Control title at evaluation time.
    pub title: String,
    /// Control severity at evaluation time.
    pub severity: Severity,
    /// Evaluation status.
    pub status: ControlStatus,
    /// The value the control requires.
    pub expected: String,
    /// The value actually observed.
    pub actual: String,
    /// Supporting detail for a human reviewer.
    pub evidence: String,
    /// Link to the relevant benchmark or documentation section.
    pub reference: String,
    /// When the control finished evaluating (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ControlResult {
    /// Build a result from a completed check outcome.
    pub fn from_outcome(
        control_id: impl Into<String>,
        title: impl Into<String>,
        severity: Severity,
        outcome: CheckOutcome,
    ) -> Self {
        Self {
            control_id: control_id.into(),
            title: title.into(),
            severity,
            status: if outcome.passed {
                ControlStatus::Pass
            } else {
                ControlStatus::Fail
            },
            expected: outcome.expected,
            actual: outcome.actual,
            evidence: outcome.evidence,
            reference: outcome.reference,
            timestamp: Utc::now(),
        }
    }

    /// Build a Manual result for a control that could not be evaluated.
    pub fn manual(
        control_id: impl Into<String>,
        title: impl Into<String>,
        severity: Severity,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            control_id: control_id.into(),
            title: title.into(),
            severity,
            status: ControlStatus::Manual,
            expected: String::new(),
            actual: String::new(),
            evidence: evidence.into(),
            reference: String::new(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_outcome_maps_status() {
        let pass = ControlResult::from_outcome(
            "1.1.1",
            "MFA enforced",
            Severity::High,
            CheckOutcome::pass("enforced", "enforced"),
        );
        assert_eq!(pass.status, ControlStatus::Pass);

        let fail = ControlResult::from_outcome(
            "1.1.2",
            "Legacy auth disabled",
            Severity::High,
            CheckOutcome::fail("disabled", "enabled"),
        );
        assert_eq!(fail.status, ControlStatus::Fail);
        assert_eq!(fail.actual, "enabled");
    }

    #[test]
    fn test_manual_result() {
        let result = ControlResult::manual(
            "2.1.1",
            "Mailbox auditing",
            Severity::Medium,
            "ServiceUnavailable: exchange not connected",
        );
        assert_eq!(result.status, ControlStatus::Manual);
        assert!(result.evidence.contains("ServiceUnavailable"));
        assert!(result.expected.is_empty());
    }
}
