//! Audit orchestration.
//!
//! The orchestrator runs every registered control against one tenant with
//! bounded concurrency and produces a complete [`AuditReport`], or nothing:
//! a cancelled or misconfigured run never surfaces partial results.
//!
//! [`AuditReport`]: sentira_types::AuditReport

mod orchestrator;
mod shutdown;

pub use orchestrator::{AuditError, Orchestrator, OrchestratorConfig};
pub use shutdown::ShutdownHandle;
