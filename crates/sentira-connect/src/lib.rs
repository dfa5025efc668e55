//! Connection management for the Sentira audit engine.
//!
//! The connection manager establishes a handle to each service a tenant's
//! controls need, once, at the start of a run. A service that fails to
//! connect is recorded as unavailable and never aborts the rest of the set;
//! controls observe the failure as a [`ServiceUnavailable`] error from
//! [`ConnectionSet::get`] and fall back to a Manual outcome at the execution
//! boundary.

mod manager;
mod set;
mod tenant;

pub use manager::{ConnectError, ConnectionManager, ServiceConnector};
pub use set::{ConnectionSet, ServiceHandle, ServiceUnavailable};
pub use tenant::TenantDescriptor;
