pub mod public_contact;

pub use public_contact::*;
