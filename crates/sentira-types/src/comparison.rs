//! Report-to-report comparison records.

use crate::ControlStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a control's status change between two reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Fail in the earlier report, Pass in the later one.
    Fixed,
    /// Pass in the earlier report, Fail in the later one.
    NewFailure,
    /// Status did not change, or one side is Manual (non-comparable).
    Unchanged,
    /// Present only in the earlier report.
    Removed,
    /// Present only in the later report.
    Added,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::NewFailure => write!(f, "NewFailure"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::Removed => write!(f, "Removed"),
            Self::Added => write!(f, "Added"),
        }
    }
}

/// One control's transition between two audit reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Control identifier.
    pub control_id: String,
    /// Status in the earlier report, if present there.
    pub status_before: Option<ControlStatus>,
    /// Status in the later report, if present there.
    pub status_after: Option<ControlStatus>,
    /// Classified transition.
    pub transition: Transition,
}
