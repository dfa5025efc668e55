//! Core data types for the Sentira compliance audit engine.

mod comparison;
mod outcome;
mod remediation;
mod report;
mod result;
mod severity;
mod status;
mod weights;

pub use comparison::{ComparisonEntry, Transition};
pub use outcome::CheckOutcome;
pub use remediation::{RemediationAction, RemediationStatus};
pub use report::AuditReport;
pub use result::ControlResult;
pub use severity::Severity;
pub use status::ControlStatus;
pub use weights::{compliance_score, SeverityWeights};
