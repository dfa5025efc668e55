//! `sentira compare` - diff two stored audit reports.

use crate::error::CliError;
use clap::Args;
use sentira_store::ReportStore;
use sentira_types::{ControlStatus, Transition};
use std::path::PathBuf;

/// Classify how compliance changed between two stored reports.
#[derive(Debug, Args)]
pub struct CompareCommand {
    /// Path to the earlier report (JSON)
    #[arg(long)]
    pub before: PathBuf,

    /// Path to the later report (JSON)
    #[arg(long)]
    pub after: PathBuf,
}

fn status_text(status: Option<ControlStatus>) -> String {
    status.map_or_else(|| "-".to_string(), |s| s.to_string())
}

impl CompareCommand {
    pub async fn execute(self, json: bool) -> Result<(), CliError> {
        let before = ReportStore::load_path(&self.before)?;
        let after = ReportStore::load_path(&self.after)?;
        let entries = sentira_compare::diff(&before, &after);

        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        for entry in &entries {
            println!(
                "{:<8} {:<6} -> {:<6} {}",
                entry.control_id,
                status_text(entry.status_before),
                status_text(entry.status_after),
                entry.transition.to_string()
            );
        }

        let count = |t: Transition| entries.iter().filter(|e| e.transition == t).count();
        println!();
        println!(
            "fixed: {}  new failures: {}  unchanged: {}  added: {}  removed: {}",
            count(Transition::Fixed),
            count(Transition::NewFailure),
            count(Transition::Unchanged),
            count(Transition::Added),
            count(Transition::Removed),
        );
        println!(
            "score: {:.2} -> {:.2}",
            before.compliance_score, after.compliance_score
        );
        Ok(())
    }
}
