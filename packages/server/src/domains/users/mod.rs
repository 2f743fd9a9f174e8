//! Accounts and per-domain access grants.

pub mod models;

pub use models::{CreateUser, DomainRole, User, UserDomainRole};
