//! `sentira remediate` - apply fixes for failing controls.

use crate::commands::{connect, load_tenant};
use crate::error::CliError;
use clap::Args;
use sentira_packs::baseline_registry;
use sentira_remediate::{ApplyOptions, RemediationEngine};
use sentira_store::{RemediationLog, ReportStore};
use std::path::PathBuf;

/// Remediate failing controls from a stored report.
#[derive(Debug, Args)]
pub struct RemediateCommand {
    /// Path to the tenant descriptor (JSON)
    #[arg(long)]
    pub tenant: PathBuf,

    /// Path to the stored audit report to remediate against
    #[arg(long)]
    pub report: PathBuf,

    /// Control ids to remediate (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub controls: Vec<String>,

    /// Describe the changes without making them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the approval gate (verification still runs)
    #[arg(long)]
    pub force: bool,

    /// Directory for the remediation log
    #[arg(long, default_value = ".sentira")]
    pub store: PathBuf,
}

impl RemediateCommand {
    pub async fn execute(self, json: bool) -> Result<(), CliError> {
        let tenant = load_tenant(&self.tenant)?;
        let connections = connect(&tenant).await;
        let registry = baseline_registry()?;
        let report = ReportStore::load_path(&self.report)?;

        let engine = RemediationEngine::new(RemediationLog::new(&self.store, &tenant.tenant_id));
        let actions = engine
            .apply_batch(
                &registry,
                &connections,
                &report,
                &self.controls,
                ApplyOptions {
                    dry_run: self.dry_run,
                    force: self.force,
                },
            )
            .await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&actions)?);
        } else {
            for action in &actions {
                let status = action.status.to_string();
                match &action.error {
                    Some(error) => {
                        println!("{:<8} {status:<10} {error}", action.control_id)
                    }
                    None => println!("{:<8} {status:<10}", action.control_id),
                }
            }
        }
        Ok(())
    }
}
