use registry_client::RegistryError;
use thiserror::Error;

use super::machines::TransitionError;
use super::models::ApplicationStatus;
use crate::common::ApplicationId;
use crate::domains::domain::DomainNameError;
use crate::domains::public_contacts::ContactSyncError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain application {0} not found")]
    NotFound(ApplicationId),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Requested domain is not a valid domain name: {0}")]
    InvalidRequestedDomain(String),

    #[error("{name:?} is not a usable .gov domain: {reason}")]
    InvalidDomainName {
        name: String,
        #[source]
        reason: DomainNameError,
    },

    #[error("Cannot approve. Requested domain is already in use.")]
    DomainInUse(String),

    #[error("An investigator is required to review an application")]
    InvestigatorRequired,

    #[error("Application is no longer {expected}; it was changed by someone else")]
    Conflict { expected: ApplicationStatus },

    #[error(transparent)]
    ContactSync(#[from] ContactSyncError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApplicationError {
    /// The registry failure underneath, if that is what stopped us
    pub fn registry_error(&self) -> Option<&RegistryError> {
        match self {
            ApplicationError::ContactSync(ContactSyncError::Registry(e)) => Some(e),
            _ => None,
        }
    }
}
