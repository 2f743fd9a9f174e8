//! Request and response payloads exchanged with the registry gateway.

use serde::{Deserialize, Serialize};

/// Every gateway answer carries an RFC 5730 result code.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub code: u16,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

/// Command wrapper sent to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEnvelope<'a, T> {
    pub cl_id: &'a str,
    pub password: &'a str,
    pub command: &'a str,
    pub data: &'a T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    /// One to three street lines
    pub street: Vec<String>,
    pub city: String,
    pub sp: String,
    pub pc: String,
    pub cc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    pub addr: ContactAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub pw: String,
}

/// A WHOIS contact as the registry stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    /// Registry-side identifier (16 characters)
    pub id: String,
    pub postal_info: PostalInfo,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    pub email: String,
    pub auth_info: AuthInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckDomainRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainAvailability {
    pub name: String,
    pub avail: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckDomainResponse {
    pub results: Vec<DomainAvailability>,
}
