//! Client for the .gov registry.
//!
//! The registry speaks an EPP-style protocol; this crate talks to the JSON
//! gateway in front of it. Every call logs in with the registrar's client id,
//! sends one command and maps the RFC 5730 result code onto [`RegistryError`].
//! Commands answered with "command failed" (2400) are retried with backoff.
//!
//! # Example
//!
//! ```rust,ignore
//! use registry_client::{RegistryClient, RegistryOptions};
//!
//! let client = RegistryClient::new(RegistryOptions::new(
//!     "https://registry.example/epp".into(),
//!     "registrar-id".into(),
//!     "secret".into(),
//! ))?;
//!
//! if client.check_domain("city.gov").await? {
//!     println!("city.gov is available");
//! }
//! ```

pub mod error;
pub mod retry;
pub mod types;

pub use error::{ErrorCode, RegistryError, Result};
pub use retry::RetryPolicy;
pub use types::{AuthInfo, ContactAddress, ContactPayload, PostalInfo};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::{CheckDomainRequest, CheckDomainResponse, CommandEnvelope, ResponseEnvelope};

#[derive(Debug, Clone)]
pub struct RegistryOptions {
    pub base_url: String,
    pub client_id: String,
    pub password: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl RegistryOptions {
    pub fn new(base_url: String, client_id: String, password: String) -> Self {
        Self {
            base_url,
            client_id,
            password,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    options: RegistryOptions,
}

impl RegistryClient {
    pub fn new(options: RegistryOptions) -> Result<Self> {
        if options.base_url.trim().is_empty() {
            return Err(RegistryError::Config("registry base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| RegistryError::Config(e.to_string()))?;

        Ok(Self { client, options })
    }

    /// Is `name` free to register?
    pub async fn check_domain(&self, name: &str) -> Result<bool> {
        let request = CheckDomainRequest {
            names: vec![name.to_string()],
        };
        let response: Option<CheckDomainResponse> = self.send("CheckDomain", &request).await?;

        let availability = response
            .and_then(|r| r.results.into_iter().find(|a| a.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| RegistryError::Syntax {
                command: "CheckDomain",
                message: format!("no availability result for {}", name),
            })?;

        if let Some(reason) = &availability.reason {
            tracing::debug!(domain = %name, reason = %reason, "Registry availability reason");
        }
        Ok(availability.avail)
    }

    /// Create or update a contact keyed by its registry id.
    ///
    /// Tries an update first; when the registry does not know the id yet the
    /// contact is created instead.
    pub async fn upsert_contact(&self, contact: &ContactPayload) -> Result<()> {
        match self.send::<_, serde_json::Value>("UpdateContact", contact).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_object_missing() => {
                tracing::debug!(registry_id = %contact.id, "Contact unknown to registry, creating");
                self.send::<_, serde_json::Value>("CreateContact", contact)
                    .await
                    .map(|_| ())
            }
            Err(err) => Err(err),
        }
    }

    /// Send one command, retrying per the configured policy.
    pub async fn send<Req, Resp>(&self, command: &'static str, data: &Req) -> Result<Option<Resp>>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        self.options
            .retry
            .run(command, || self.send_once(command, data))
            .await
    }

    async fn send_once<Req, Resp>(&self, command: &'static str, data: &Req) -> Result<Option<Resp>>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/commands", self.options.base_url.trim_end_matches('/'));
        let envelope = CommandEnvelope {
            cl_id: &self.options.client_id,
            password: &self.options.password,
            command,
            data,
        };

        let resp = self
            .client
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| RegistryError::Transport {
                command,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RegistryError::Login { command });
        }
        if status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Transport {
                command,
                message: format!("gateway returned {}: {}", status, body),
            });
        }

        let envelope: ResponseEnvelope<Resp> =
            resp.json().await.map_err(|e| RegistryError::Syntax {
                command,
                message: e.to_string(),
            })?;

        into_result(envelope)
    }
}

fn into_result<T>(envelope: ResponseEnvelope<T>) -> Result<Option<T>> {
    if envelope.code >= 2000 {
        return Err(RegistryError::Response {
            code: envelope.code,
            message: envelope.msg,
        });
    }
    Ok(envelope.data)
}

/// Build the registry representation of a WHOIS contact.
#[allow(clippy::too_many_arguments)]
pub fn contact_payload(
    registry_id: &str,
    name: &str,
    org: Option<&str>,
    street: &[Option<&str>],
    city: &str,
    sp: &str,
    pc: &str,
    cc: &str,
    email: &str,
    voice: &str,
    fax: Option<&str>,
    pw: &str,
) -> ContactPayload {
    ContactPayload {
        id: registry_id.to_string(),
        postal_info: PostalInfo {
            name: name.to_string(),
            org: org.map(str::to_string),
            addr: ContactAddress {
                street: street.iter().flatten().map(|s| s.to_string()).collect(),
                city: city.to_string(),
                sp: sp.to_string(),
                pc: pc.to_string(),
                cc: cc.to_string(),
            },
        },
        voice: voice.to_string(),
        fax: fax.map(str::to_string),
        email: email.to_string(),
        auth_info: AuthInfo { pw: pw.to_string() },
    }
}
