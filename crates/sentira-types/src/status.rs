//! Control evaluation status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a single control evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStatus {
    /// The configuration meets the control's requirement.
    Pass,
    /// The configuration violates the control's requirement.
    Fail,
    /// The status could not be determined automatically (unavailable
    /// service, execution error, or intentionally deferred to human review).
    Manual,
}

impl ControlStatus {
    /// Whether the status was determined automatically.
    pub fn is_determined(&self) -> bool {
        !matches!(self, Self::Manual)
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_determined() {
        assert!(ControlStatus::Pass.is_determined());
        assert!(ControlStatus::Fail.is_determined());
        assert!(!ControlStatus::Manual.is_determined());
    }
}
