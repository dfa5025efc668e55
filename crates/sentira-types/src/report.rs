//! Aggregate audit report.

use crate::{compliance_score, ControlResult, SeverityWeights};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The aggregate result of one audit run against one tenant.
///
/// Immutable once built: the orchestrator constructs the report in full and
/// collaborators (renderers, stores, the comparison engine) only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Tenant the run was executed against.
    pub tenant_id: String,
    /// Unique identifier for this run.
    pub run_id: String,
    /// When the run started (UTC).
    pub run_timestamp: DateTime<Utc>,
    /// One result per registered control, in registry order.
    pub results: Vec<ControlResult>,
    /// Severity-weighted percentage of non-Manual controls that passed.
    pub compliance_score: f64,
}

impl AuditReport {
    /// Build a report from collected results, computing the score.
    pub fn new(
        tenant_id: impl Into<String>,
        run_timestamp: DateTime<Utc>,
        results: Vec<ControlResult>,
        weights: &SeverityWeights,
    ) -> Self {
        let compliance_score = compliance_score(&results, weights);
        Self {
            tenant_id: tenant_id.into(),
            run_id: uuid::Uuid::new_v4().to_string(),
            run_timestamp,
            results,
            compliance_score,
        }
    }

    /// Look up a result by control id.
    pub fn result(&self, control_id: &str) -> Option<&ControlResult> {
        self.results.iter().find(|r| r.control_id == control_id)
    }

    /// Count of results with the given status.
    pub fn count_with(&self, status: crate::ControlStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckOutcome, ControlStatus, Severity};

    #[test]
    fn test_report_scores_on_construction() {
        let results = vec![
            ControlResult::from_outcome(
                "1.1.1",
                "a",
                Severity::High,
                CheckOutcome::pass("x", "x"),
            ),
            ControlResult::from_outcome(
                "1.1.2",
                "b",
                Severity::Medium,
                CheckOutcome::fail("x", "y"),
            ),
        ];
        let report = AuditReport::new(
            "contoso",
            Utc::now(),
            results,
            &SeverityWeights::default(),
        );
        assert!((report.compliance_score - 100.0 * 7.0 / 11.0).abs() < 1e-9);
        assert_eq!(report.count_with(ControlStatus::Pass), 1);
        assert!(report.result("1.1.2").is_some());
        assert!(report.result("9.9.9").is_none());
    }

    #[test]
    fn test_report_roundtrips_through_serde() {
        let report = AuditReport::new(
            "contoso",
            Utc::now(),
            vec![ControlResult::manual(
                "1.1.1",
                "a",
                Severity::Low,
                "timed out",
            )],
            &SeverityWeights::default(),
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
