use registry_client::RegistryError;
use thiserror::Error;

/// Saving a WHOIS contact failed; nothing was committed unless noted.
#[derive(Debug, Error)]
pub enum ContactSyncError {
    #[error("Invalid contact fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    #[error("Registry id {0} already belongs to another domain or contact role")]
    RegistryIdTaken(String),

    #[error("Registry rejected contact: {0}")]
    Registry(#[from] RegistryError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
