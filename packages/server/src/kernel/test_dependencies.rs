// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use registry_client::{ContactPayload, RegistryError};
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::email::{EmailMessage, EmailSendingError};
use super::{BaseEmailService, BaseRegistryClient, ServerDeps};

// =============================================================================
// Mock Email Service
// =============================================================================

#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every send fails
    pub fn failing() -> Self {
        let service = Self::default();
        service.set_failing(true);
        service
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all messages that were sent (or attempted while failing)
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Messages sent to one address
    pub fn sent_to(&self, to: &str) -> Vec<EmailMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.to.eq_ignore_ascii_case(to))
            .collect()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailSendingError> {
        self.sent.lock().unwrap().push(message.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(EmailSendingError::Transport("mock email failure".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Mock Registry Client
// =============================================================================

#[derive(Clone, Default)]
pub struct MockRegistryClient {
    upserts: Arc<Mutex<Vec<ContactPayload>>>,
    checks: Arc<Mutex<Vec<String>>>,
    taken: Arc<Mutex<HashSet<String>>>,
    fail_code: Arc<Mutex<Option<u16>>>,
}

impl MockRegistryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command with the given result code
    pub fn fail_with(&self, code: u16) {
        *self.fail_code.lock().unwrap() = Some(code);
    }

    pub fn recover(&self) {
        *self.fail_code.lock().unwrap() = None;
    }

    /// Mark a domain as registered at the registry
    pub fn with_taken(self, name: &str) -> Self {
        self.taken.lock().unwrap().insert(name.to_lowercase());
        self
    }

    /// Every upsert that reached the registry, in order
    pub fn upserts(&self) -> Vec<ContactPayload> {
        self.upserts.lock().unwrap().clone()
    }

    /// The last payload stored under `registry_id`
    pub fn contact(&self, registry_id: &str) -> Option<ContactPayload> {
        self.upserts()
            .into_iter()
            .rev()
            .find(|c| c.id == registry_id)
    }

    pub fn checks(&self) -> Vec<String> {
        self.checks.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<RegistryError> {
        self.fail_code
            .lock()
            .unwrap()
            .map(|code| RegistryError::Response {
                code,
                message: "mock registry failure".to_string(),
            })
    }
}

#[async_trait]
impl BaseRegistryClient for MockRegistryClient {
    async fn upsert_contact(&self, contact: &ContactPayload) -> Result<(), RegistryError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.upserts.lock().unwrap().push(contact.clone());
        Ok(())
    }

    async fn check_domain(&self, name: &str) -> Result<bool, RegistryError> {
        self.checks.lock().unwrap().push(name.to_string());
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(!self.taken.lock().unwrap().contains(&name.to_lowercase()))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus the ServerDeps built from them
#[derive(Clone)]
pub struct TestDependencies {
    pub email: MockEmailService,
    pub registry: MockRegistryClient,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            email: MockEmailService::new(),
            registry: MockRegistryClient::new(),
        }
    }

    pub fn into_server_deps(&self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            Arc::new(self.email.clone()),
            Arc::new(self.registry.clone()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
