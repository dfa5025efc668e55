//! Severity weighting and compliance score computation.

use crate::{ControlResult, ControlStatus, Severity};
use serde::{Deserialize, Serialize};

/// Weight assigned to each severity when scoring a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    /// Weight for Critical controls.
    pub critical: f64,
    /// Weight for High controls.
    pub high: f64,
    /// Weight for Medium controls.
    pub medium: f64,
    /// Weight for Low controls.
    pub low: f64,
}

impl SeverityWeights {
    /// Look up the weight for a severity.
    pub fn weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: 10.0,
            high: 7.0,
            medium: 4.0,
            low: 1.0,
        }
    }
}

/// Compute the severity-weighted compliance score for a result set.
///
/// Manual controls are excluded from both numerator and denominator: an
/// undetermined control neither helps nor hurts the score. If every control
/// is Manual the score is 0 by convention.
pub fn compliance_score(results: &[ControlResult], weights: &SeverityWeights) -> f64 {
    let mut passed = 0.0;
    let mut total = 0.0;
    for result in results {
        if result.status == ControlStatus::Manual {
            continue;
        }
        let w = weights.weight(result.severity);
        total += w;
        if result.status == ControlStatus::Pass {
            passed += w;
        }
    }
    if total == 0.0 {
        return 0.0;
    }
    100.0 * passed / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckOutcome;
    use proptest::prelude::*;

    fn result(id: &str, severity: Severity, status: ControlStatus) -> ControlResult {
        match status {
            ControlStatus::Pass => ControlResult::from_outcome(
                id,
                "test",
                severity,
                CheckOutcome::pass("x", "x"),
            ),
            ControlStatus::Fail => ControlResult::from_outcome(
                id,
                "test",
                severity,
                CheckOutcome::fail("x", "y"),
            ),
            ControlStatus::Manual => ControlResult::manual(id, "test", severity, "undetermined"),
        }
    }

    #[test]
    fn test_default_weights() {
        let w = SeverityWeights::default();
        assert_eq!(w.weight(Severity::Critical), 10.0);
        assert_eq!(w.weight(Severity::High), 7.0);
        assert_eq!(w.weight(Severity::Medium), 4.0);
        assert_eq!(w.weight(Severity::Low), 1.0);
    }

    #[test]
    fn test_score_example_from_benchmark() {
        // Pass(High=7), Fail(Medium=4) => 100 * 7 / 11
        let results = vec![
            result("1", Severity::High, ControlStatus::Pass),
            result("2", Severity::Medium, ControlStatus::Fail),
        ];
        let score = compliance_score(&results, &SeverityWeights::default());
        assert!((score - 100.0 * 7.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_manual_scores_zero() {
        let results = vec![
            result("1", Severity::Critical, ControlStatus::Manual),
            result("2", Severity::Low, ControlStatus::Manual),
        ];
        assert_eq!(
            compliance_score(&results, &SeverityWeights::default()),
            0.0
        );
    }

    #[test]
    fn test_empty_results_score_zero() {
        assert_eq!(compliance_score(&[], &SeverityWeights::default()), 0.0);
    }

    #[test]
    fn test_manual_excluded_from_denominator() {
        // Pass(High) + Manual(Critical): the Manual control must not dilute.
        let results = vec![
            result("1", Severity::High, ControlStatus::Pass),
            result("2", Severity::Critical, ControlStatus::Manual),
        ];
        assert_eq!(
            compliance_score(&results, &SeverityWeights::default()),
            100.0
        );
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let results = vec![
            result("1", Severity::High, ControlStatus::Pass),
            result("2", Severity::Medium, ControlStatus::Fail),
            result("3", Severity::Low, ControlStatus::Pass),
        ];
        let w = SeverityWeights::default();
        let a = compliance_score(&results, &w);
        let b = compliance_score(&results, &w);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(statuses in prop::collection::vec(0u8..3, 0..50)) {
            let severities = [
                Severity::Critical,
                Severity::High,
                Severity::Medium,
                Severity::Low,
            ];
            let results: Vec<ControlResult> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let status = match s {
                        0 => ControlStatus::Pass,
                        1 => ControlStatus::Fail,
                        _ => ControlStatus::Manual,
                    };
                    result(&i.to_string(), severities[i % 4], status)
                })
                .collect();
            let score = compliance_score(&results, &SeverityWeights::default());
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
