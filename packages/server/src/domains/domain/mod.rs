//! Registered .gov domains and the name rules for requesting one.

pub mod activities;
pub mod models;
pub mod name;

pub use activities::{check_availability, Availability};
pub use models::{Domain, DomainState};
pub use name::DomainNameError;
