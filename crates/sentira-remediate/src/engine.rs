//! The remediation engine.

use chrono::Utc;
use futures_util::FutureExt;
use parking_lot::Mutex;
use sentira_connect::ConnectionSet;
use sentira_registry::{Control, ControlRegistry};
use sentira_store::{LogEntry, RemediationLog, StoreError};
use sentira_types::{AuditReport, ControlStatus, RemediationAction, RemediationStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, warn};

/// A remediation request could not start.
///
/// During batch applies these become `Failed` actions instead of aborting
/// the batch; only log I/O failures propagate.
#[derive(Debug, thiserror::Error)]
pub enum RemediationError {
    /// The control id is not in the registry.
    #[error("control '{0}' is not registered")]
    UnknownControl(String),
    /// The control definition has no automated fix.
    #[error("control '{0}' is not remediable")]
    NotRemediable(String),
    /// The control did not fail in the supplied report.
    #[error("control '{0}' is not failing in the supplied report")]
    NotFailing(String),
    /// A real apply was requested without approval or force.
    #[error("control '{0}' requires approval before apply")]
    ApprovalRequired(String),
    /// The preview itself failed.
    #[error("preview failed for control '{id}': {detail}")]
    PreviewFailed {
        /// Control id.
        id: String,
        /// What went wrong.
        detail: String,
    },
}

/// Description of the change a remediation would make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    /// Control the preview targets.
    pub control_id: String,
    /// Human-readable description of the change that would be made.
    pub description: String,
}

/// Options for an apply call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Behave exactly like a preview; make no change.
    pub dry_run: bool,
    /// Skip the approval gate. Verification still runs.
    pub force: bool,
}

/// Applies fixes for failing controls, one state machine per control.
pub struct RemediationEngine {
    log: RemediationLog,
    approvals: Mutex<HashSet<String>>,
}

impl RemediationEngine {
    /// Create an engine writing to the given tenant log.
    pub fn new(log: RemediationLog) -> Self {
        Self {
            log,
            approvals: Mutex::new(HashSet::new()),
        }
    }

    /// Record approval for a control (called by an external approval gate).
    pub fn approve(&self, control_id: &str) {
        info!(control = control_id, "remediation approved");
        self.approvals.lock().insert(control_id.to_string());
    }

    fn is_approved(&self, control_id: &str) -> bool {
        self.approvals.lock().contains(control_id)
    }

    /// Look up a control and confirm it failed in the report and is fixable.
    fn eligible<'r>(
        &self,
        registry: &'r ControlRegistry,
        report: &AuditReport,
        control_id: &str,
    ) -> Result<&'r Arc<dyn Control>, RemediationError> {
        let control = registry
            .get(control_id)
            .ok_or_else(|| RemediationError::UnknownControl(control_id.to_string()))?;
        if !control.remediable() {
            return Err(RemediationError::NotRemediable(control_id.to_string()));
        }
        match report.result(control_id).map(|r| r.status) {
            Some(ControlStatus::Fail) => Ok(control),
            _ => Err(RemediationError::NotFailing(control_id.to_string())),
        }
    }

    /// Describe the change that would fix a failing control, without making it.
    pub async fn preview(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        report: &AuditReport,
        control_id: &str,
    ) -> Result<PreviewResult, RemediationError> {
        let control = self.eligible(registry, report, control_id)?;
        let description =
            control
                .preview_fix(connections)
                .await
                .map_err(|e| RemediationError::PreviewFailed {
                    id: control_id.to_string(),
                    detail: e.to_string(),
                })?;
        Ok(PreviewResult {
            control_id: control_id.to_string(),
            description,
        })
    }

    /// Preview a batch of controls; one entry per requested id.
    pub async fn preview_batch(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        report: &AuditReport,
        control_ids: &[String],
    ) -> Vec<Result<PreviewResult, RemediationError>> {
        let mut previews = Vec::with_capacity(control_ids.len());
        for id in control_ids {
            previews.push(self.preview(registry, connections, report, id).await);
        }
        previews
    }

    /// Attempt to fix one failing control.
    ///
    /// Per-control conditions (not remediable, approval missing, apply or
    /// verify failure, a panicking fix) come back as a `Failed` action; only
    /// failure to write the audit log propagates as an error. Every call is
    /// logged.
    pub async fn apply(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        report: &AuditReport,
        control_id: &str,
        options: ApplyOptions,
    ) -> Result<RemediationAction, StoreError> {
        // Same absorption the audit path gives checks: a panic inside a fix
        // hook never escapes one control's attempt.
        let inner = self.apply_inner(registry, connections, report, control_id, options);
        let action = match AssertUnwindSafe(inner).catch_unwind().await {
            Ok(action) => action,
            Err(payload) => {
                let detail = panic_detail(payload.as_ref());
                warn!(control = control_id, detail = %detail, "remediation panicked");
                RemediationAction::failed(control_id, options.dry_run, format!("Panic: {detail}"))
            }
        };
        self.log.append(&LogEntry {
            control_id: action.control_id.clone(),
            dry_run: action.dry_run,
            status: action.status,
            timestamp: Utc::now(),
        })?;
        Ok(action)
    }

    async fn apply_inner(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        report: &AuditReport,
        control_id: &str,
        options: ApplyOptions,
    ) -> RemediationAction {
        let control = match self.eligible(registry, report, control_id) {
            Ok(control) => Arc::clone(control),
            Err(e) => {
                warn!(control = control_id, error = %e, "remediation rejected");
                return RemediationAction::failed(control_id, options.dry_run, e.to_string());
            }
        };

        if options.dry_run {
            // Dry run is a preview under the apply surface: same description,
            // no observable side effect on the external system.
            return match control.preview_fix(connections).await {
                Ok(_) => RemediationAction {
                    control_id: control_id.to_string(),
                    dry_run: true,
                    status: RemediationStatus::Previewed,
                    error: None,
                    applied_at: None,
                },
                Err(e) => RemediationAction::failed(control_id, true, e.to_string()),
            };
        }

        if !options.force && !self.is_approved(control_id) {
            let e = RemediationError::ApprovalRequired(control_id.to_string());
            warn!(control = control_id, "apply without approval");
            return RemediationAction::failed(control_id, false, e.to_string());
        }

        if let Err(e) = control.apply_fix(connections).await {
            warn!(control = control_id, error = %e, "apply failed");
            return RemediationAction::failed(control_id, false, e.to_string());
        }
        let applied_at = Utc::now();
        info!(control = control_id, "fix applied, verifying");

        // Verification always runs, forced or not.
        match control.check(connections).await {
            Ok(outcome) if outcome.passed => RemediationAction {
                control_id: control_id.to_string(),
                dry_run: false,
                status: RemediationStatus::Verified,
                error: None,
                applied_at: Some(applied_at),
            },
            Ok(outcome) => {
                warn!(
                    control = control_id,
                    actual = %outcome.actual,
                    "fix did not verify"
                );
                let error = format!("verification failed: actual={}", outcome.actual);
                if control.supports_rollback() {
                    match control.rollback_fix(connections).await {
                        Ok(()) => RemediationAction {
                            control_id: control_id.to_string(),
                            dry_run: false,
                            status: RemediationStatus::RolledBack,
                            error: Some(error),
                            applied_at: Some(applied_at),
                        },
                        Err(e) => RemediationAction {
                            control_id: control_id.to_string(),
                            dry_run: false,
                            status: RemediationStatus::Failed,
                            error: Some(format!("{error}; rollback failed: {e}")),
                            applied_at: Some(applied_at),
                        },
                    }
                } else {
                    RemediationAction {
                        control_id: control_id.to_string(),
                        dry_run: false,
                        status: RemediationStatus::Failed,
                        error: Some(error),
                        applied_at: Some(applied_at),
                    }
                }
            }
            Err(e) => RemediationAction {
                control_id: control_id.to_string(),
                dry_run: false,
                status: RemediationStatus::Failed,
                error: Some(format!("verification check failed: {e}")),
                applied_at: Some(applied_at),
            },
        }
    }

    /// Apply a batch of controls independently.
    ///
    /// One control's failure never blocks the rest; the returned list holds
    /// one action per requested id, in request order.
    pub async fn apply_batch(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        report: &AuditReport,
        control_ids: &[String],
        options: ApplyOptions,
    ) -> Result<Vec<RemediationAction>, StoreError> {
        let mut actions = Vec::with_capacity(control_ids.len());
        for id in control_ids {
            actions.push(self.apply(registry, connections, report, id, options).await);
        }
        actions.into_iter().collect()
    }

    /// Replay the tenant's remediation log.
    pub fn log_entries(&self) -> Result<Vec<LogEntry>, StoreError> {
        self.log.read_all()
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
