use thiserror::Error;

use crate::common::{DomainId, InvitationId};

#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("Domain invitation {0} not found")]
    NotFound(InvitationId),

    #[error("Domain {0} not found")]
    DomainNotFound(DomainId),

    #[error("No user with the email address {email} exists yet")]
    UserNotFound { email: String },

    #[error("Invitation {0} was already retrieved")]
    AlreadyRetrieved(InvitationId),

    #[error("{email} has already been invited to this domain")]
    AlreadyInvited { email: String },

    #[error("{email} is already a manager for this domain")]
    AlreadyManager { email: String },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
