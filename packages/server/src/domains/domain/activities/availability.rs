//! Is a requested .gov name free?

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::domains::domain::models::Domain;
use crate::domains::domain::name::{self, DomainNameError};
use crate::kernel::ServerDeps;

const AVAILABLE_MESSAGE: &str = "That domain is available!";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    fn available() -> Self {
        Self {
            available: true,
            message: AVAILABLE_MESSAGE.to_string(),
        }
    }

    fn unavailable(reason: DomainNameError) -> Self {
        Self {
            available: false,
            message: reason.to_string(),
        }
    }
}

/// Validate a requested name and check it against our records and the registry.
///
/// Validation problems are answered, not raised. Only infrastructure
/// failures (database, registry) are errors.
pub async fn check_availability(raw: &str, deps: &ServerDeps) -> Result<Availability> {
    let label = match name::normalize(raw) {
        Ok(label) => label,
        Err(reason) => return Ok(Availability::unavailable(reason)),
    };
    let fqdn = name::fqdn(&label);

    if Domain::exists_by_name(&fqdn, &deps.db_pool).await? {
        debug!(domain = %fqdn, "Domain already registered locally");
        return Ok(Availability::unavailable(DomainNameError::Unavailable));
    }

    if !deps.registry.check_domain(&fqdn).await? {
        debug!(domain = %fqdn, "Registry reports domain unavailable");
        return Ok(Availability::unavailable(DomainNameError::Unavailable));
    }

    Ok(Availability::available())
}
