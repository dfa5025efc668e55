//! Immutable report storage.

use crate::StoreError;
use sentira_types::AuditReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem store for audit reports.
///
/// Each report is one immutable JSON file at
/// `<root>/<tenant>/reports/<run_timestamp>.json`. Writing an existing key
/// fails; stored reports are never rewritten.
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn report_path(&self, tenant: &str, run_timestamp: &str) -> PathBuf {
        self.root
            .join(tenant)
            .join("reports")
            .join(format!("{run_timestamp}.json"))
    }

    fn timestamp_key(report: &AuditReport) -> String {
        // Filesystem-safe RFC 3339 variant.
        report
            .run_timestamp
            .format("%Y-%m-%dT%H-%M-%S%.6fZ")
            .to_string()
    }

    /// Persist a report as one immutable unit. Returns the storage key.
    pub fn save(&self, report: &AuditReport) -> Result<String, StoreError> {
        let key = Self::timestamp_key(report);
        let path = self.report_path(&report.tenant_id, &key);
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                tenant: report.tenant_id.clone(),
                run_timestamp: key,
            });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(report)?;
        fs::write(&path, json)?;
        debug!(tenant = %report.tenant_id, key = %key, "report persisted");
        Ok(key)
    }

    /// Load a report by its storage key.
    pub fn load(&self, tenant: &str, run_timestamp: &str) -> Result<AuditReport, StoreError> {
        let path = self.report_path(tenant, run_timestamp);
        if !path.exists() {
            return Err(StoreError::NotFound {
                tenant: tenant.to_string(),
                run_timestamp: run_timestamp.to_string(),
            });
        }
        Self::load_path(&path)
    }

    /// Load a report straight from a JSON file path.
    pub fn load_path(path: &Path) -> Result<AuditReport, StoreError> {
        let json = fs::read(path)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Storage keys for a tenant's reports, oldest first.
    pub fn list(&self, tenant: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.root.join(tenant).join("reports");
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sentira_types::{CheckOutcome, ControlResult, Severity, SeverityWeights};

    fn sample_report(tenant: &str) -> AuditReport {
        AuditReport::new(
            tenant,
            Utc::now(),
            vec![ControlResult::from_outcome(
                "1.1.1",
                "MFA enforced",
                Severity::High,
                CheckOutcome::pass("enforced", "enforced"),
            )],
            &SeverityWeights::default(),
        )
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let report = sample_report("contoso");

        let key = store.save(&report).unwrap();
        let loaded = store.load("contoso", &key).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_reports_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let report = sample_report("contoso");

        store.save(&report).unwrap();
        let err = store.save(&report).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[test]
    fn test_list_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let mut a = sample_report("contoso");
        a.run_timestamp = "2026-01-02T00:00:00Z".parse().unwrap();
        let mut b = sample_report("contoso");
        b.run_timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        store.save(&a).unwrap();
        store.save(&b).unwrap();

        let keys = store.list("contoso").unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0] < keys[1]);
    }

    #[test]
    fn test_missing_report_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        assert!(matches!(
            store.load("contoso", "2026-01-01T00-00-00.000000Z"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.list("contoso").unwrap().is_empty());
    }
}
