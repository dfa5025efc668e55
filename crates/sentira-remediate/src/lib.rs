//! Safe remediation of failing controls.
//!
//! Each control moves through a small state machine:
//!
//! ```text
//! Detected -> Previewed -> (Approved -> Applied -> Verified) | Failed
//!                                               \-> RolledBack
//! ```
//!
//! A dry-run apply behaves exactly like a preview and makes no change on the
//! external system. A real apply always re-runs the control's check
//! afterwards, even when forced; a fix that does not verify is reported as
//! `Failed` (and rolled back when the control supports it). Every apply
//! call, dry-run or real, lands in the tenant's append-only remediation log.

mod engine;

pub use engine::{ApplyOptions, PreviewResult, RemediationEngine, RemediationError};
