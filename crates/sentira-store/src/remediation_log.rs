//! Append-only remediation audit trail.

use crate::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sentira_types::RemediationStatus;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// One line in the remediation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Control the apply call targeted.
    pub control_id: String,
    /// Whether the call was a dry run.
    pub dry_run: bool,
    /// Final state of the attempt.
    pub status: RemediationStatus,
    /// When the entry was written (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Append-only JSON-lines log of every remediation apply call.
///
/// The engine never rewrites or truncates this file; the writer is guarded
/// by a single mutex so concurrent applies cannot interleave entries. The
/// lock is never held across an await point.
pub struct RemediationLog {
    path: PathBuf,
    writer: Mutex<()>,
}

impl RemediationLog {
    /// Open (or create the parent of) a tenant's log under the store root.
    pub fn new(root: impl Into<PathBuf>, tenant: &str) -> Self {
        Self {
            path: root.into().join(tenant).join("remediation.log"),
            writer: Mutex::new(()),
        }
    }

    /// Append one entry. Entries are written whole, one per line.
    pub fn append(&self, entry: &LogEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.writer.lock();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Replay every entry in append order.
    pub fn read_all(&self) -> Result<Vec<LogEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path)?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(control_id: &str, dry_run: bool, status: RemediationStatus) -> LogEntry {
        LogEntry {
            control_id: control_id.to_string(),
            dry_run,
            status,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_and_replay() {
        let dir = tempfile::tempdir().unwrap();
        let log = RemediationLog::new(dir.path(), "contoso");

        log.append(&entry("1.1.1", true, RemediationStatus::Previewed))
            .unwrap();
        log.append(&entry("1.1.1", false, RemediationStatus::Verified))
            .unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status, RemediationStatus::Previewed);
        assert!(entries[0].dry_run);
        assert_eq!(entries[1].status, RemediationStatus::Verified);
    }

    #[test]
    fn test_log_accumulates_across_instances() {
        // Reopening the log must never truncate it.
        let dir = tempfile::tempdir().unwrap();
        {
            let log = RemediationLog::new(dir.path(), "contoso");
            log.append(&entry("1.1.1", false, RemediationStatus::Failed))
                .unwrap();
        }
        let log = RemediationLog::new(dir.path(), "contoso");
        log.append(&entry("1.1.2", false, RemediationStatus::Verified))
            .unwrap();
        assert_eq!(log.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(RemediationLog::new(dir.path(), "contoso"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        log.append(&entry(
                            &format!("{i}.{j}"),
                            false,
                            RemediationStatus::Applied,
                        ))
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every line parses cleanly; corruption would break deserialization.
        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 200);
    }

    #[test]
    fn test_empty_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = RemediationLog::new(dir.path(), "contoso");
        assert!(log.read_all().unwrap().is_empty());
    }
}
