//! Service connection establishment.

use crate::{ConnectionSet, ServiceHandle, TenantDescriptor};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A connect attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The service settings in the tenant descriptor are malformed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    /// The service could not be reached.
    #[error("unreachable: {0}")]
    Unreachable(String),
    /// The service rejected the supplied credentials.
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}

/// Establishes a handle to one kind of service.
///
/// Implementations wrap the vendor SDK for their service; the engine treats
/// the settings document and the produced handle as opaque.
#[async_trait]
pub trait ServiceConnector: Send + Sync {
    /// The service name this connector handles.
    fn service(&self) -> &str;

    /// Attempt to connect using the tenant's settings for this service.
    async fn connect(&self, settings: &serde_json::Value) -> Result<ServiceHandle, ConnectError>;
}

/// Builds a [`ConnectionSet`] for a tenant from a set of connectors.
///
/// Connection failures are isolated per service: a failed connect is recorded
/// in the set and the remaining services are still attempted.
pub struct ConnectionManager {
    connectors: HashMap<String, Box<dyn ServiceConnector>>,
}

impl ConnectionManager {
    /// Create a manager with no connectors.
    pub fn new() -> Self {
        Self {
            connectors: HashMap::new(),
        }
    }

    /// Register a connector for its service name.
    pub fn with_connector(mut self, connector: Box<dyn ServiceConnector>) -> Self {
        self.connectors
            .insert(connector.service().to_string(), connector);
        self
    }

    /// Connect every service the tenant declares.
    ///
    /// Services without a registered connector, and services whose connect
    /// attempt fails, are recorded as unavailable. This method itself never
    /// fails: the returned set always has one entry per declared service.
    pub async fn establish(&self, tenant: &TenantDescriptor) -> ConnectionSet {
        let mut set = ConnectionSet::new();
        for (name, settings) in &tenant.services {
            let Some(connector) = self.connectors.get(name) else {
                warn!(service = %name, "no connector registered for service");
                set.insert_failed(name, "no connector registered");
                continue;
            };
            match connector.connect(settings).await {
                Ok(handle) => {
                    debug!(service = %name, "service connected");
                    set.insert(name, handle);
                }
                Err(e) => {
                    warn!(service = %name, error = %e, "service connection failed");
                    set.insert_failed(name, e.to_string());
                }
            }
        }
        set
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct OkConnector;

    #[async_trait]
    impl ServiceConnector for OkConnector {
        fn service(&self) -> &str {
            "config"
        }

        async fn connect(
            &self,
            settings: &serde_json::Value,
        ) -> Result<ServiceHandle, ConnectError> {
            let endpoint = settings
                .get("endpoint")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ConnectError::InvalidSettings("missing endpoint".into()))?;
            Ok(ServiceHandle::new(endpoint.to_string()))
        }
    }

    struct DownConnector;

    #[async_trait]
    impl ServiceConnector for DownConnector {
        fn service(&self) -> &str {
            "exchange"
        }

        async fn connect(&self, _: &serde_json::Value) -> Result<ServiceHandle, ConnectError> {
            Err(ConnectError::Unreachable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_rest() {
        let manager = ConnectionManager::new()
            .with_connector(Box::new(DownConnector))
            .with_connector(Box::new(OkConnector));
        let tenant = TenantDescriptor::new("contoso")
            .with_service("exchange", json!({}))
            .with_service("config", json!({"endpoint": "https://example.test"}));

        let set = manager.establish(&tenant).await;
        assert_eq!(set.len(), 2);
        assert!(set.is_available("config"));
        assert!(!set.is_available("exchange"));
        assert!(set.get("exchange").is_err());
    }

    #[tokio::test]
    async fn test_missing_connector_recorded_as_unavailable() {
        let manager = ConnectionManager::new();
        let tenant = TenantDescriptor::new("contoso").with_service("sharepoint", json!({}));
        let set = manager.establish(&tenant).await;
        assert!(!set.is_available("sharepoint"));
        let err = set.get("sharepoint").unwrap_err();
        assert!(err.to_string().contains("no connector registered"));
    }

    #[tokio::test]
    async fn test_invalid_settings_recorded_as_unavailable() {
        let manager = ConnectionManager::new().with_connector(Box::new(OkConnector));
        let tenant = TenantDescriptor::new("contoso").with_service("config", json!({}));
        let set = manager.establish(&tenant).await;
        assert!(!set.is_available("config"));
    }
}
