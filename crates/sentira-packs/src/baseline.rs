//! Pre-defined baseline controls.

use crate::{ConfigService, CONFIG_SERVICE};
use async_trait::async_trait;
use sentira_connect::ConnectionSet;
use sentira_registry::{CheckError, Control, ControlRegistry, RegistryError};
use sentira_types::{CheckOutcome, Severity};
use serde_json::{json, Value};

/// A control over one boolean tenant setting.
struct BoolSetting {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    severity: Severity,
    path: &'static str,
    required: bool,
    reference: &'static str,
}

impl BoolSetting {
    fn describe(value: Option<&Value>) -> String {
        match value {
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
            None => "unset".to_string(),
        }
    }
}

#[async_trait]
impl Control for BoolSetting {
    fn id(&self) -> &str {
        self.id
    }
    fn title(&self) -> &str {
        self.title
    }
    fn category(&self) -> &str {
        self.category
    }
    fn severity(&self) -> Severity {
        self.severity
    }
    fn remediable(&self) -> bool {
        true
    }
    fn supports_rollback(&self) -> bool {
        true
    }

    async fn check(&self, connections: &ConnectionSet) -> Result<CheckOutcome, CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        let value = config.get(self.path);
        let actual = Self::describe(value.as_ref());
        let expected = self.required.to_string();
        let outcome = if value == Some(Value::Bool(self.required)) {
            CheckOutcome::pass(expected, actual)
        } else {
            let evidence = format!("{} is {actual}", self.path);
            CheckOutcome::fail(expected, actual).with_evidence(evidence)
        };
        Ok(outcome.with_reference(self.reference))
    }

    async fn preview_fix(&self, connections: &ConnectionSet) -> Result<String, CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        let current = Self::describe(config.get(self.path).as_ref());
        Ok(format!(
            "would set {} = {} (currently {current})",
            self.path, self.required
        ))
    }

    async fn apply_fix(&self, connections: &ConnectionSet) -> Result<(), CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        config.set(self.path, json!(self.required));
        Ok(())
    }

    async fn rollback_fix(&self, connections: &ConnectionSet) -> Result<(), CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        config.set(self.path, json!(!self.required));
        Ok(())
    }
}

/// A control requiring a numeric setting to meet a minimum.
struct NumericMin {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    severity: Severity,
    path: &'static str,
    min: i64,
    reference: &'static str,
}

#[async_trait]
impl Control for NumericMin {
    fn id(&self) -> &str {
        self.id
    }
    fn title(&self) -> &str {
        self.title
    }
    fn category(&self) -> &str {
        self.category
    }
    fn severity(&self) -> Severity {
        self.severity
    }
    fn remediable(&self) -> bool {
        true
    }

    async fn check(&self, connections: &ConnectionSet) -> Result<CheckOutcome, CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        let value = config.get(self.path).and_then(|v| v.as_i64());
        let expected = format!(">= {}", self.min);
        let actual = value.map_or_else(|| "unset".to_string(), |v| v.to_string());
        let outcome = match value {
            Some(v) if v >= self.min => CheckOutcome::pass(expected, actual),
            _ => CheckOutcome::fail(expected, actual)
                .with_evidence(format!("{} below required minimum", self.path)),
        };
        Ok(outcome.with_reference(self.reference))
    }

    async fn preview_fix(&self, connections: &ConnectionSet) -> Result<String, CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        let current = config
            .get(self.path)
            .and_then(|v| v.as_i64())
            .map_or_else(|| "unset".to_string(), |v| v.to_string());
        Ok(format!(
            "would set {} = {} (currently {current})",
            self.path, self.min
        ))
    }

    async fn apply_fix(&self, connections: &ConnectionSet) -> Result<(), CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        config.set(self.path, json!(self.min));
        Ok(())
    }
}

/// A control requiring a numeric setting to stay under a maximum.
///
/// No automated fix: shortening sessions can log users out mid-task, so the
/// change stays with an operator.
struct NumericMax {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    severity: Severity,
    path: &'static str,
    max: i64,
    reference: &'static str,
}

#[async_trait]
impl Control for NumericMax {
    fn id(&self) -> &str {
        self.id
    }
    fn title(&self) -> &str {
        self.title
    }
    fn category(&self) -> &str {
        self.category
    }
    fn severity(&self) -> Severity {
        self.severity
    }

    async fn check(&self, connections: &ConnectionSet) -> Result<CheckOutcome, CheckError> {
        let config = connections.client::<ConfigService>(CONFIG_SERVICE)?;
        let value = config.get(self.path).and_then(|v| v.as_i64());
        let expected = format!("<= {}", self.max);
        let actual = value.map_or_else(|| "unset".to_string(), |v| v.to_string());
        let outcome = match value {
            Some(v) if v <= self.max => CheckOutcome::pass(expected, actual),
            _ => CheckOutcome::fail(expected, actual),
        };
        Ok(outcome.with_reference(self.reference))
    }
}

/// A control that always defers to human review.
struct DeferredReview {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    severity: Severity,
    reason: &'static str,
}

#[async_trait]
impl Control for DeferredReview {
    fn id(&self) -> &str {
        self.id
    }
    fn title(&self) -> &str {
        self.title
    }
    fn category(&self) -> &str {
        self.category
    }
    fn severity(&self) -> Severity {
        self.severity
    }

    async fn check(&self, _: &ConnectionSet) -> Result<CheckOutcome, CheckError> {
        Err(CheckError::DeferToReview(self.reason.to_string()))
    }
}

/// Build the baseline registry: identity, audit, and access-policy controls
/// over the tenant settings document.
pub fn baseline_registry() -> Result<ControlRegistry, RegistryError> {
    let mut registry = ControlRegistry::new();
    registry.register(Box::new(BoolSetting {
        id: "1.1.1",
        title: "Multi-factor authentication required for all users",
        category: "Identity",
        severity: Severity::Critical,
        path: "security.mfa_required",
        required: true,
        reference: "Baseline 1.1.1",
    }))?;
    registry.register(Box::new(BoolSetting {
        id: "1.1.2",
        title: "Legacy authentication protocols disabled",
        category: "Identity",
        severity: Severity::High,
        path: "security.legacy_auth_enabled",
        required: false,
        reference: "Baseline 1.1.2",
    }))?;
    registry.register(Box::new(BoolSetting {
        id: "2.1.1",
        title: "Unified audit logging enabled",
        category: "Audit Logging",
        severity: Severity::High,
        path: "audit.log_enabled",
        required: true,
        reference: "Baseline 2.1.1",
    }))?;
    registry.register(Box::new(NumericMin {
        id: "3.1.1",
        title: "Password minimum length at least 14 characters",
        category: "Access Policy",
        severity: Severity::Medium,
        path: "security.password_min_length",
        min: 14,
        reference: "Baseline 3.1.1",
    }))?;
    registry.register(Box::new(NumericMax {
        id: "3.2.1",
        title: "Idle session timeout at most 60 minutes",
        category: "Access Policy",
        severity: Severity::Low,
        path: "sessions.timeout_minutes",
        max: 60,
        reference: "Baseline 3.2.1",
    }))?;
    registry.register(Box::new(DeferredReview {
        id: "4.1.1",
        title: "External sharing recipients reviewed",
        category: "Collaboration",
        severity: Severity::Medium,
        reason: "recipient list requires human review",
    }))?;
    Ok(registry)
}
