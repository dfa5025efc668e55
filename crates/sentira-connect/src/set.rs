//! Established service handles for one audit run.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// An opaque, shared handle to a connected service.
///
/// Handles are shared read-only across concurrently executing controls;
/// a control downcasts to the concrete client type its connector produced.
#[derive(Clone)]
pub struct ServiceHandle(Arc<dyn Any + Send + Sync>);

impl ServiceHandle {
    /// Wrap a concrete client.
    pub fn new<T: Any + Send + Sync>(client: T) -> Self {
        Self(Arc::new(client))
    }

    /// Downcast to the concrete client type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceHandle(..)")
    }
}

/// A required service could not be used.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceUnavailable {
    /// The service connected but the handle has an unexpected type.
    #[error("service '{0}' has an unexpected handle type")]
    WrongType(String),
    /// The service failed to connect at run start.
    #[error("service '{name}' is unavailable: {reason}")]
    ConnectFailed {
        /// Service name.
        name: String,
        /// Why the connect attempt failed.
        reason: String,
    },
    /// The tenant never declared the service.
    #[error("service '{0}' is not configured for this tenant")]
    NotConfigured(String),
}

#[derive(Debug, Clone)]
enum ServiceState {
    Connected(ServiceHandle),
    Failed { reason: String },
}

/// The set of service handles available to one audit run.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    services: HashMap<String, ServiceState>,
}

impl ConnectionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully connected service.
    pub fn insert(&mut self, name: impl Into<String>, handle: ServiceHandle) {
        self.services
            .insert(name.into(), ServiceState::Connected(handle));
    }

    /// Record a service that failed to connect.
    pub fn insert_failed(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.services.insert(
            name.into(),
            ServiceState::Failed {
                reason: reason.into(),
            },
        );
    }

    /// Whether the named service connected successfully.
    pub fn is_available(&self, name: &str) -> bool {
        matches!(self.services.get(name), Some(ServiceState::Connected(_)))
    }

    /// Get the handle for a service.
    pub fn get(&self, name: &str) -> Result<&ServiceHandle, ServiceUnavailable> {
        match self.services.get(name) {
            Some(ServiceState::Connected(handle)) => Ok(handle),
            Some(ServiceState::Failed { reason }) => Err(ServiceUnavailable::ConnectFailed {
                name: name.to_string(),
                reason: reason.clone(),
            }),
            None => Err(ServiceUnavailable::NotConfigured(name.to_string())),
        }
    }

    /// Get the handle for a service, downcast to its concrete client type.
    pub fn client<T: std::any::Any + Send + Sync>(
        &self,
        name: &str,
    ) -> Result<&T, ServiceUnavailable> {
        self.get(name)?
            .downcast::<T>()
            .ok_or_else(|| ServiceUnavailable::WrongType(name.to_string()))
    }

    /// Number of services in the set (connected or failed).
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the set holds no services at all.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeClient {
        endpoint: String,
    }

    #[test]
    fn test_get_connected() {
        let mut set = ConnectionSet::new();
        set.insert(
            "config",
            ServiceHandle::new(FakeClient {
                endpoint: "https://example.test".into(),
            }),
        );
        assert!(set.is_available("config"));
        let client = set.client::<FakeClient>("config").unwrap();
        assert_eq!(client.endpoint, "https://example.test");
    }

    #[test]
    fn test_get_failed_is_err_not_panic() {
        let mut set = ConnectionSet::new();
        set.insert_failed("exchange", "connection refused");
        assert!(!set.is_available("exchange"));
        let err = set.get("exchange").unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_get_unconfigured() {
        let set = ConnectionSet::new();
        assert!(matches!(
            set.get("sharepoint"),
            Err(ServiceUnavailable::NotConfigured(_))
        ));
    }

    #[test]
    fn test_wrong_type_downcast() {
        let mut set = ConnectionSet::new();
        set.insert("config", ServiceHandle::new(42u32));
        assert!(matches!(
            set.client::<FakeClient>("config"),
            Err(ServiceUnavailable::WrongType(_))
        ));
    }
}
