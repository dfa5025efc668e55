//! Tenant settings service.

use async_trait::async_trait;
use parking_lot::RwLock;
use sentira_connect::{ConnectError, ServiceConnector, ServiceHandle};
use serde_json::Value;

/// Name of the tenant settings service.
pub const CONFIG_SERVICE: &str = "config";

/// In-memory view of the tenant settings document.
///
/// Checks read it; remediable controls rewrite individual keys through the
/// same handle, which is how fixes become observable to the verification
/// re-check.
pub struct ConfigService {
    doc: RwLock<Value>,
}

impl ConfigService {
    /// Wrap a settings document.
    pub fn new(doc: Value) -> Self {
        Self {
            doc: RwLock::new(doc),
        }
    }

    /// Read a value at a dotted path (e.g. `"security.mfa_required"`).
    pub fn get(&self, path: &str) -> Option<Value> {
        let doc = self.doc.read();
        let mut cursor = &*doc;
        for segment in path.split('.') {
            cursor = cursor.get(segment)?;
        }
        Some(cursor.clone())
    }

    /// Write a value at a dotted path, creating intermediate objects.
    pub fn set(&self, path: &str, value: Value) {
        let mut doc = self.doc.write();
        let mut cursor = &mut *doc;
        let segments: Vec<&str> = path.split('.').collect();
        for segment in &segments[..segments.len() - 1] {
            if !cursor.get(*segment).map(Value::is_object).unwrap_or(false) {
                cursor[*segment] = Value::Object(Default::default());
            }
            cursor = cursor.get_mut(*segment).unwrap();
        }
        cursor[segments[segments.len() - 1]] = value;
    }
}

/// Connector exposing the tenant descriptor's `config` entry as a
/// [`ConfigService`] handle.
pub struct ConfigConnector;

#[async_trait]
impl ServiceConnector for ConfigConnector {
    fn service(&self) -> &str {
        CONFIG_SERVICE
    }

    async fn connect(&self, settings: &Value) -> Result<ServiceHandle, ConnectError> {
        if !settings.is_object() {
            return Err(ConnectError::InvalidSettings(
                "config settings must be an object".into(),
            ));
        }
        Ok(ServiceHandle::new(ConfigService::new(settings.clone())))
    }
}
