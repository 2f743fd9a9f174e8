// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseEmailService)

use async_trait::async_trait;
use registry_client::{ContactPayload, RegistryError};

use super::email::{EmailMessage, EmailSendingError};

// =============================================================================
// Email Trait (Infrastructure - transactional email)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Deliver a fully rendered message
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailSendingError>;
}

// =============================================================================
// Registry Trait (Infrastructure - authoritative domain registry)
// =============================================================================

#[async_trait]
pub trait BaseRegistryClient: Send + Sync {
    /// Create or update a WHOIS contact keyed by its registry id
    async fn upsert_contact(&self, contact: &ContactPayload) -> Result<(), RegistryError>;

    /// Is the domain free to register?
    async fn check_domain(&self, name: &str) -> Result<bool, RegistryError>;
}
