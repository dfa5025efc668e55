//! Subcommand implementations.

mod compare;
mod preview;
mod remediate;
mod run;

pub use compare::CompareCommand;
pub use preview::PreviewCommand;
pub use remediate::RemediateCommand;
pub use run::RunCommand;

use crate::error::CliError;
use sentira_connect::{ConnectionManager, ConnectionSet, TenantDescriptor};
use sentira_packs::ConfigConnector;
use std::path::Path;

/// Load a tenant descriptor from a JSON file.
pub(crate) fn load_tenant(path: &Path) -> Result<TenantDescriptor, CliError> {
    let json = std::fs::read(path)
        .map_err(|e| CliError::Config(format!("cannot read tenant file {}: {e}", path.display())))?;
    Ok(serde_json::from_slice(&json)?)
}

/// Connect the services the tenant declares.
pub(crate) async fn connect(tenant: &TenantDescriptor) -> ConnectionSet {
    ConnectionManager::new()
        .with_connector(Box::new(ConfigConnector))
        .establish(tenant)
        .await
}
