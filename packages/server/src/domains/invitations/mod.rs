//! Email invitations to manage a domain.

pub mod activities;
pub mod error;
pub mod machines;
pub mod models;
pub mod templates;

pub use activities::{first_login, invite, retrieve, InviteOutcome};
pub use error::InvitationError;
pub use models::{DomainInvitation, InvitationStatus};
