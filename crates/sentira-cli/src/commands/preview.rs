//! `sentira preview` - describe remediations without applying them.

use crate::commands::{connect, load_tenant};
use crate::error::CliError;
use clap::Args;
use sentira_packs::baseline_registry;
use sentira_remediate::RemediationEngine;
use sentira_store::{RemediationLog, ReportStore};
use std::path::PathBuf;

/// Preview what remediation would change for failing controls.
#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Path to the tenant descriptor (JSON)
    #[arg(long)]
    pub tenant: PathBuf,

    /// Path to the stored audit report to remediate against
    #[arg(long)]
    pub report: PathBuf,

    /// Control ids to preview (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub controls: Vec<String>,

    /// Directory for the remediation log
    #[arg(long, default_value = ".sentira")]
    pub store: PathBuf,
}

impl PreviewCommand {
    pub async fn execute(self, json: bool) -> Result<(), CliError> {
        let tenant = load_tenant(&self.tenant)?;
        let connections = connect(&tenant).await;
        let registry = baseline_registry()?;
        let report = ReportStore::load_path(&self.report)?;

        let engine = RemediationEngine::new(RemediationLog::new(&self.store, &tenant.tenant_id));
        let previews = engine
            .preview_batch(&registry, &connections, &report, &self.controls)
            .await;

        if json {
            let rows: Vec<serde_json::Value> = previews
                .iter()
                .zip(&self.controls)
                .map(|(preview, id)| match preview {
                    Ok(p) => serde_json::json!({
                        "control_id": p.control_id,
                        "description": p.description,
                    }),
                    Err(e) => serde_json::json!({
                        "control_id": id,
                        "error": e.to_string(),
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for (preview, id) in previews.iter().zip(&self.controls) {
                match preview {
                    Ok(p) => println!("{:<8} {}", p.control_id, p.description),
                    Err(e) => println!("{id:<8} cannot preview: {e}"),
                }
            }
        }
        Ok(())
    }
}
