//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod email;
pub mod test_dependencies;
pub mod traits;

pub use deps::{RegistryAdapter, ServerDeps};
pub use email::{send_templated_email, EmailMessage, EmailSendingError, EmailTemplate, HttpEmailService};
pub use test_dependencies::{MockEmailService, MockRegistryClient, TestDependencies};
pub use traits::*;
