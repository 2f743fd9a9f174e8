//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain activities.
//! All external services use trait abstractions to enable testing.

use async_trait::async_trait;
use registry_client::{ContactPayload, RegistryClient, RegistryError};
use sqlx::PgPool;
use std::sync::Arc;

use crate::kernel::{BaseEmailService, BaseRegistryClient};

// =============================================================================
// RegistryClient Adapter (implements BaseRegistryClient trait)
// =============================================================================

/// Wrapper around RegistryClient that implements BaseRegistryClient trait
pub struct RegistryAdapter(pub Arc<RegistryClient>);

impl RegistryAdapter {
    pub fn new(client: Arc<RegistryClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseRegistryClient for RegistryAdapter {
    async fn upsert_contact(&self, contact: &ContactPayload) -> Result<(), RegistryError> {
        self.0.upsert_contact(contact).await
    }

    async fn check_domain(&self, name: &str) -> Result<bool, RegistryError> {
        self.0.check_domain(name).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub email: Arc<dyn BaseEmailService>,
    pub registry: Arc<dyn BaseRegistryClient>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        email: Arc<dyn BaseEmailService>,
        registry: Arc<dyn BaseRegistryClient>,
    ) -> Self {
        Self {
            db_pool,
            email,
            registry,
        }
    }
}
