//! Tenant descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative description of a tenant and the services it exposes.
///
/// The per-service settings are opaque to the engine; each
/// [`ServiceConnector`](crate::ServiceConnector) interprets its own entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDescriptor {
    /// Stable tenant identifier.
    pub tenant_id: String,
    /// Service name to connector-specific settings.
    #[serde(default)]
    pub services: BTreeMap<String, serde_json::Value>,
}

impl TenantDescriptor {
    /// Create a descriptor with no services.
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            services: BTreeMap::new(),
        }
    }

    /// Add settings for a service.
    pub fn with_service(mut self, name: impl Into<String>, settings: serde_json::Value) -> Self {
        self.services.insert(name.into(), settings);
        self
    }

    /// Names of the services this tenant declares, in stable order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}
