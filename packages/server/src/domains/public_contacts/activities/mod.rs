pub mod save;

pub use save::{provision_default_contacts, save_contact, save_contact_in};
