//! Raw outcome returned by a control's check function.

use serde::{Deserialize, Serialize};

/// The determination a check function makes about the tenant configuration.
///
/// A check either passes or fails; the Manual status is reserved for the
/// execution boundary, which assigns it when a check errors, times out, or
/// cannot reach its service. Check bodies never construct Manual themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Whether the checked setting met the requirement.
    pub passed: bool,
    /// The value the control requires.
    pub expected: String,
    /// The value actually observed.
    pub actual: String,
    /// Supporting detail for a human reviewer.
    pub evidence: String,
    /// Link to the relevant benchmark or documentation section.
    pub reference: String,
}

impl CheckOutcome {
    /// Build a passing outcome.
    pub fn pass(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            passed: true,
            expected: expected.into(),
            actual: actual.into(),
            evidence: String::new(),
            reference: String::new(),
        }
    }

    /// Build a failing outcome.
    pub fn fail(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            passed: false,
            expected: expected.into(),
            actual: actual.into(),
            evidence: String::new(),
            reference: String::new(),
        }
    }

    /// Attach evidence text.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    /// Attach a benchmark reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let outcome = CheckOutcome::fail("enabled", "disabled")
            .with_evidence("AuditLogEnabled=false in tenant settings")
            .with_reference("CIS 5.1");
        assert!(!outcome.passed);
        assert_eq!(outcome.expected, "enabled");
        assert_eq!(outcome.actual, "disabled");
        assert_eq!(outcome.reference, "CIS 5.1");
    }
}
