//! The audit run orchestrator.

use crate::ShutdownHandle;
use chrono::Utc;
use sentira_connect::ConnectionSet;
use sentira_registry::{execute_one, ControlRegistry};
use sentira_types::{AuditReport, ControlResult, SeverityWeights};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// An audit run could not produce a report.
///
/// These are operational failures; content failures (controls that Fail or
/// come back Manual) still produce a complete report.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The registry has no controls; nothing to run.
    #[error("registry has no controls")]
    EmptyRegistry,
    /// The run was cancelled before completing; no partial report surfaces.
    #[error("audit run was cancelled")]
    RunCancelled,
}

/// Tunables for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum controls evaluating concurrently.
    pub max_concurrent: usize,
    /// Per-control evaluation timeout.
    pub control_timeout: Duration,
    /// Severity weights used for the compliance score.
    pub weights: SeverityWeights,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            control_timeout: Duration::from_secs(300),
            weights: SeverityWeights::default(),
        }
    }
}

/// Runs all registered controls against one tenant.
pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator with the given configuration.
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Execute every control in the registry and aggregate the results.
    ///
    /// Controls run with bounded concurrency but results always land in
    /// registry order: each control writes into its own pre-assigned slot.
    /// The per-control isolation boundary guarantees one result per control,
    /// so the returned report is always complete. A shutdown signal discards
    /// the whole run instead.
    pub async fn run(
        &self,
        registry: &ControlRegistry,
        connections: &ConnectionSet,
        tenant_id: &str,
        shutdown: &ShutdownHandle,
    ) -> Result<AuditReport, AuditError> {
        if registry.is_empty() {
            return Err(AuditError::EmptyRegistry);
        }

        let run_timestamp = Utc::now();
        info!(
            tenant = tenant_id,
            controls = registry.len(),
            max_concurrent = self.config.max_concurrent,
            "starting audit run"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));
        let connections = Arc::new(connections.clone());
        let timeout = self.config.control_timeout;

        let mut tasks: JoinSet<(usize, ControlResult)> = JoinSet::new();
        for (index, control) in registry.iter().enumerate() {
            let control = Arc::clone(control);
            let connections = Arc::clone(&connections);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // The orchestrator owns the semaphore and never closes it.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("audit semaphore is never closed");
                let result = execute_one(&control, &connections, Some(timeout)).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<ControlResult>> = (0..registry.len()).map(|_| None).collect();
        let mut shutdown_rx = shutdown.subscribe();
        let mut completed = 0usize;

        while completed < slots.len() {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    warn!(tenant = tenant_id, completed, "audit run cancelled");
                    tasks.abort_all();
                    return Err(AuditError::RunCancelled);
                }
                joined = tasks.join_next() => {
                    match joined {
                        Some(Ok((index, result))) => {
                            slots[index] = Some(result);
                            completed += 1;
                        }
                        // execute_one absorbs panics, so a join error only
                        // occurs on abort, which the shutdown arm handles.
                        Some(Err(_)) | None => {
                            return Err(AuditError::RunCancelled);
                        }
                    }
                }
            }
        }

        let results: Vec<ControlResult> = slots.into_iter().flatten().collect();
        debug_assert_eq!(results.len(), registry.len());

        let report = AuditReport::new(tenant_id, run_timestamp, results, &self.config.weights);
        info!(
            tenant = tenant_id,
            score = report.compliance_score,
            "audit run complete"
        );
        Ok(report)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default())
    }
}
