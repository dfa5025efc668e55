//! `sentira run` - execute an audit run.

use crate::commands::{connect, load_tenant};
use crate::error::CliError;
use clap::Args;
use sentira_engine::{Orchestrator, OrchestratorConfig, ShutdownHandle};
use sentira_packs::baseline_registry;
use sentira_store::ReportStore;
use sentira_types::ControlStatus;
use std::path::PathBuf;
use std::time::Duration;

/// Run all registered controls against a tenant.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Path to the tenant descriptor (JSON)
    #[arg(long)]
    pub tenant: PathBuf,

    /// Directory for persisted reports and the remediation log
    #[arg(long, default_value = ".sentira")]
    pub store: PathBuf,

    /// Maximum controls evaluating concurrently
    #[arg(long, default_value_t = 5)]
    pub max_concurrent: usize,

    /// Per-control timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,
}

impl RunCommand {
    pub async fn execute(self, json: bool) -> Result<(), CliError> {
        let tenant = load_tenant(&self.tenant)?;
        let connections = connect(&tenant).await;
        let registry = baseline_registry()?;

        let shutdown = ShutdownHandle::new();
        tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    shutdown.shutdown();
                }
            }
        });

        let orchestrator = Orchestrator::new(OrchestratorConfig {
            max_concurrent: self.max_concurrent,
            control_timeout: Duration::from_secs(self.timeout_secs),
            ..OrchestratorConfig::default()
        });
        let report = orchestrator
            .run(&registry, &connections, &tenant.tenant_id, &shutdown)
            .await?;

        let key = ReportStore::new(&self.store).save(&report)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for result in &report.results {
                println!(
                    "{:<8} [{:<8}] {:<8} {}",
                    result.control_id,
                    result.severity.to_string(),
                    result.status.to_string(),
                    result.title
                );
            }
            println!();
            println!(
                "compliance score: {:.2} ({} pass / {} fail / {} manual)",
                report.compliance_score,
                report.count_with(ControlStatus::Pass),
                report.count_with(ControlStatus::Fail),
                report.count_with(ControlStatus::Manual),
            );
            println!("report stored as {key}");
        }
        Ok(())
    }
}
