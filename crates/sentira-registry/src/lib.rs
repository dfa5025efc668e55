//! Control registry and safe execution boundary.
//!
//! A control is a single named compliance check against tenant
//! configuration. The registry owns the id → control mapping (duplicate ids
//! are a startup error, not a runtime surprise) and [`execute_one`] is the
//! single place where a control's failure is absorbed: errors, panics, and
//! timeouts all become a `Manual` result, never an aborted run.

mod control;
mod executor;
mod registry;

pub use control::{CheckError, Control};
pub use executor::execute_one;
pub use registry::{ControlRegistry, RegistryError};
