// Business domains
pub mod applications;
pub mod contacts;
pub mod domain;
pub mod invitations;
pub mod public_contacts;
pub mod users;
