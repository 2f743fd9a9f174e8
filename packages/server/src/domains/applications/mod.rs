//! Domain applications and their review lifecycle.

pub mod activities;
pub mod error;
pub mod machines;
pub mod models;
pub mod templates;

pub use activities::{
    approve, begin_review, create_application, reject, submit_application, withdraw,
    ContactInput, NewApplication,
};
pub use error::ApplicationError;
pub use machines::{ApplicationAction, StatusChange, TransitionError};
pub use models::{ApplicationDetails, ApplicationStatus, DomainApplication, OrganizationType};
