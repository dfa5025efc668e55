//! Report-to-report comparison.
//!
//! Classifies how each control's status changed between two audit runs.
//! Manual is a neutral, non-comparable state: a transition touching Manual
//! on either side is reported verbatim but classified as Unchanged, never
//! coerced to Pass or Fail.

use sentira_types::{AuditReport, ComparisonEntry, ControlStatus, Transition};
use std::collections::HashMap;

/// Diff two audit reports by control id.
///
/// Pure: no side effects, and identical inputs yield identical output.
/// Entry order is `after`'s registry order, then any controls present only
/// in `before` appended in `before`'s registry order.
pub fn diff(before: &AuditReport, after: &AuditReport) -> Vec<ComparisonEntry> {
    let before_by_id: HashMap<&str, ControlStatus> = before
        .results
        .iter()
        .map(|r| (r.control_id.as_str(), r.status))
        .collect();
    let after_by_id: HashMap<&str, ControlStatus> = after
        .results
        .iter()
        .map(|r| (r.control_id.as_str(), r.status))
        .collect();

    let mut entries = Vec::with_capacity(after.results.len());
    for result in &after.results {
        let status_before = before_by_id.get(result.control_id.as_str()).copied();
        entries.push(ComparisonEntry {
            control_id: result.control_id.clone(),
            status_before,
            status_after: Some(result.status),
            transition: classify(status_before, Some(result.status)),
        });
    }
    for result in &before.results {
        if !after_by_id.contains_key(result.control_id.as_str()) {
            entries.push(ComparisonEntry {
                control_id: result.control_id.clone(),
                status_before: Some(result.status),
                status_after: None,
                transition: Transition::Removed,
            });
        }
    }
    entries
}

fn classify(before: Option<ControlStatus>, after: Option<ControlStatus>) -> Transition {
    match (before, after) {
        (None, Some(_)) => Transition::Added,
        (Some(_), None) => Transition::Removed,
        (Some(ControlStatus::Fail), Some(ControlStatus::Pass)) => Transition::Fixed,
        (Some(ControlStatus::Pass), Some(ControlStatus::Fail)) => Transition::NewFailure,
        // Same status, or Manual on either side.
        (Some(_), Some(_)) => Transition::Unchanged,
        (None, None) => Transition::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sentira_types::{CheckOutcome, ControlResult, Severity, SeverityWeights};
    use test_case::test_case;

    fn result(id: &str, status: ControlStatus) -> ControlResult {
        match status {
            ControlStatus::Pass => {
                ControlResult::from_outcome(id, "t", Severity::Medium, CheckOutcome::pass("x", "x"))
            }
            ControlStatus::Fail => {
                ControlResult::from_outcome(id, "t", Severity::Medium, CheckOutcome::fail("x", "y"))
            }
            ControlStatus::Manual => ControlResult::manual(id, "t", Severity::Medium, "e"),
        }
    }

    fn report(results: Vec<ControlResult>) -> AuditReport {
        AuditReport::new("contoso", Utc::now(), results, &SeverityWeights::default())
    }

    #[test]
    fn test_improvement_scenario() {
        let before = report(vec![
            result("1.1.1", ControlStatus::Fail),
            result("2.1.1", ControlStatus::Pass),
        ]);
        let after = report(vec![
            result("1.1.1", ControlStatus::Pass),
            result("2.1.1", ControlStatus::Pass),
            result("3.1.1", ControlStatus::Fail),
        ]);

        let entries = diff(&before, &after);
        let summary: Vec<(&str, Transition)> = entries
            .iter()
            .map(|e| (e.control_id.as_str(), e.transition))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("1.1.1", Transition::Fixed),
                ("2.1.1", Transition::Unchanged),
                ("3.1.1", Transition::Added),
            ]
        );
    }

    #[test]
    fn test_removed_entries_appended_in_before_order() {
        let before = report(vec![
            result("1.1.1", ControlStatus::Pass),
            result("2.1.1", ControlStatus::Fail),
            result("3.1.1", ControlStatus::Pass),
        ]);
        let after = report(vec![result("2.1.1", ControlStatus::Fail)]);

        let entries = diff(&before, &after);
        let ids: Vec<&str> = entries.iter().map(|e| e.control_id.as_str()).collect();
        assert_eq!(ids, vec!["2.1.1", "1.1.1", "3.1.1"]);
        assert_eq!(entries[1].transition, Transition::Removed);
        assert_eq!(entries[2].transition, Transition::Removed);
        assert!(entries[1].status_after.is_none());
    }

    #[test_case(ControlStatus::Manual, ControlStatus::Pass; "manual to pass")]
    #[test_case(ControlStatus::Manual, ControlStatus::Fail; "manual to fail")]
    #[test_case(ControlStatus::Pass, ControlStatus::Manual; "pass to manual")]
    #[test_case(ControlStatus::Fail, ControlStatus::Manual; "fail to manual")]
    #[test_case(ControlStatus::Manual, ControlStatus::Manual; "manual both sides")]
    fn test_manual_is_neutral(before_status: ControlStatus, after_status: ControlStatus) {
        let before = report(vec![result("1.1.1", before_status)]);
        let after = report(vec![result("1.1.1", after_status)]);

        let entries = diff(&before, &after);
        assert_eq!(entries[0].transition, Transition::Unchanged);
        // Statuses are reported verbatim.
        assert_eq!(entries[0].status_before, Some(before_status));
        assert_eq!(entries[0].status_after, Some(after_status));
    }

    #[test]
    fn test_fixed_and_new_failure_are_symmetric() {
        let a = report(vec![
            result("1.1.1", ControlStatus::Fail),
            result("2.1.1", ControlStatus::Pass),
            result("3.1.1", ControlStatus::Pass),
        ]);
        let b = report(vec![
            result("1.1.1", ControlStatus::Pass),
            result("2.1.1", ControlStatus::Fail),
            result("3.1.1", ControlStatus::Pass),
        ]);

        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        let fixed_forward: Vec<&str> = forward
            .iter()
            .filter(|e| e.transition == Transition::Fixed)
            .map(|e| e.control_id.as_str())
            .collect();
        let regressed_backward: Vec<&str> = backward
            .iter()
            .filter(|e| e.transition == Transition::NewFailure)
            .map(|e| e.control_id.as_str())
            .collect();
        assert_eq!(fixed_forward, regressed_backward);
        assert_eq!(fixed_forward, vec!["1.1.1"]);
    }

    #[test]
    fn test_diff_is_deterministic() {
        let before = report(vec![
            result("1.1.1", ControlStatus::Fail),
            result("2.1.1", ControlStatus::Manual),
        ]);
        let after = report(vec![result("1.1.1", ControlStatus::Pass)]);
        assert_eq!(diff(&before, &after), diff(&before, &after));
    }
}
