//! The failure-isolation boundary for control execution.

use crate::Control;
use futures_util::FutureExt;
use sentira_connect::ConnectionSet;
use sentira_types::ControlResult;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Execute a single control and convert every failure mode into a result.
///
/// This is the one place in the engine where a check's error, panic, or
/// timeout is absorbed: whatever happens inside `check`, the caller receives
/// exactly one [`ControlResult`]. A crash here can therefore never abort an
/// audit run. Evidence text carries the failure (`"timed out"` for timeouts,
/// `"<kind>: <detail>"` otherwise).
pub async fn execute_one(
    control: &Arc<dyn Control>,
    connections: &ConnectionSet,
    timeout: Option<Duration>,
) -> ControlResult {
    let check = AssertUnwindSafe(control.check(connections)).catch_unwind();
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, check).await {
            Ok(completed) => completed,
            Err(_) => {
                warn!(control = control.id(), "control timed out");
                return ControlResult::manual(
                    control.id(),
                    control.title(),
                    control.severity(),
                    "timed out",
                );
            }
        },
        None => check.await,
    };

    match outcome {
        Ok(Ok(outcome)) => {
            debug!(
                control = control.id(),
                passed = outcome.passed,
                "control evaluated"
            );
            ControlResult::from_outcome(control.id(), control.title(), control.severity(), outcome)
        }
        Ok(Err(e)) => {
            warn!(control = control.id(), error = %e, "control could not be determined");
            ControlResult::manual(
                control.id(),
                control.title(),
                control.severity(),
                e.to_string(),
            )
        }
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            warn!(control = control.id(), detail = %detail, "control panicked");
            ControlResult::manual(
                control.id(),
                control.title(),
                control.severity(),
                format!("Panic: {detail}"),
            )
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
