pub mod models;

pub use models::{Contact, CreateContact};
