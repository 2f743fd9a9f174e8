//! WHOIS contacts published for each domain and kept in step with the registry.

pub mod activities;
pub mod defaults;
pub mod error;
pub mod models;
pub mod registry_id;
pub mod validation;

pub use activities::{provision_default_contacts, save_contact, save_contact_in};
pub use defaults::DefaultContacts;
pub use error::ContactSyncError;
pub use models::{ContactFields, ContactType, PublicContact, PublicContactDraft};
pub use registry_id::generate_registry_id;
