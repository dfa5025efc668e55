//! Control registration and lookup.

use crate::Control;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry loading failed.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A control id was registered twice.
    #[error("duplicate control id '{0}'")]
    DuplicateControlId(String),
}

/// The id → control mapping for one audit configuration.
///
/// Controls are registered once at startup and are read-only for the life of
/// the process. Iteration order is insertion order, which fixes the order of
/// results in every report produced from this registry.
#[derive(Default)]
pub struct ControlRegistry {
    controls: Vec<Arc<dyn Control>>,
    by_id: HashMap<String, usize>,
}

impl ControlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control. Duplicate ids fail at load time.
    pub fn register(&mut self, control: Box<dyn Control>) -> Result<(), RegistryError> {
        let id = control.id().to_string();
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateControlId(id));
        }
        self.by_id.insert(id, self.controls.len());
        self.controls.push(Arc::from(control));
        Ok(())
    }

    /// Look up a control by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Control>> {
        self.by_id.get(id).map(|&i| &self.controls[i])
    }

    /// Iterate controls in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Control>> {
        self.controls.iter()
    }

    /// Number of registered controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the registry has no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckError;
    use async_trait::async_trait;
    use sentira_connect::ConnectionSet;
    use sentira_types::{CheckOutcome, Severity};

    struct Stub(&'static str);

    #[async_trait]
    impl Control for Stub {
        fn id(&self) -> &str {
            self.0
        }
        fn title(&self) -> &str {
            "stub"
        }
        fn category(&self) -> &str {
            "test"
        }
        fn severity(&self) -> Severity {
            Severity::Low
        }
        async fn check(&self, _: &ConnectionSet) -> Result<CheckOutcome, CheckError> {
            Ok(CheckOutcome::pass("x", "x"))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ControlRegistry::new();
        registry.register(Box::new(Stub("1.1.1"))).unwrap();
        registry.register(Box::new(Stub("1.1.2"))).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("1.1.1").is_some());
        assert!(registry.get("9.9.9").is_none());
    }

    #[test]
    fn test_duplicate_id_is_load_error() {
        let mut registry = ControlRegistry::new();
        registry.register(Box::new(Stub("1.1.1"))).unwrap();
        let err = registry.register(Box::new(Stub("1.1.1"))).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateControlId(id) if id == "1.1.1"));
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut registry = ControlRegistry::new();
        for id in ["3.1.1", "1.1.1", "2.1.1"] {
            registry.register(Box::new(Stub(id))).unwrap();
        }
        let order: Vec<&str> = registry.iter().map(|c| c.id()).collect();
        assert_eq!(order, vec!["3.1.1", "1.1.1", "2.1.1"]);
    }
}
