//! Built-in baseline control pack.
//!
//! Configuration controls evaluated against a tenant settings document
//! exposed through the `config` service. These cover the engine's needs for
//! a working out-of-the-box registry; packs wrapping vendor SDKs register
//! their own controls through the same [`sentira_registry::Control`] trait.

mod baseline;
mod config_service;

pub use baseline::baseline_registry;
pub use config_service::{ConfigConnector, ConfigService, CONFIG_SERVICE};
