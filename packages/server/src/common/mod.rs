// Common types and utilities shared across the application

pub mod audit;
pub mod entity_ids;
pub mod id;

pub use audit::AuditEntry;
pub use entity_ids::*;
pub use id::Id;
