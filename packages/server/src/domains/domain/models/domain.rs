use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgConnection;

use crate::common::{DomainId, PublicContactId};
use crate::domains::public_contacts::{ContactType, PublicContact};

/// Lifecycle of a domain at the registry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "domain_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DomainState {
    /// Not yet confirmed at the registry
    Unknown,
    Created,
    Deleted,
}

/// A registered .gov domain
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    pub state: DomainState,
    pub registrant_contact_id: Option<PublicContactId>,
    pub administrative_contact_id: Option<PublicContactId>,
    pub technical_contact_id: Option<PublicContactId>,
    pub security_contact_id: Option<PublicContactId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// The contact currently filling `role`
    pub fn contact_id(&self, role: ContactType) -> Option<PublicContactId> {
        match role {
            ContactType::Registrant => self.registrant_contact_id,
            ContactType::Administrative => self.administrative_contact_id,
            ContactType::Technical => self.technical_contact_id,
            ContactType::Security => self.security_contact_id,
        }
    }
}

fn reference_column(role: ContactType) -> &'static str {
    match role {
        ContactType::Registrant => "registrant_contact_id",
        ContactType::Administrative => "administrative_contact_id",
        ContactType::Technical => "technical_contact_id",
        ContactType::Security => "security_contact_id",
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Domain {
    pub async fn find_by_id<'e>(id: DomainId, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM domains WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }

    pub async fn find<'e>(id: DomainId, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM domains WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_name<'e>(name: &str, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM domains WHERE LOWER(name) = LOWER($1)")
            .bind(name.trim())
            .fetch_optional(db)
            .await
            .map_err(Into::into)
    }

    pub async fn exists_by_name<'e>(name: &str, db: impl PgExecutor<'e>) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM domains WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name.trim())
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    pub async fn create<'e>(name: &str, state: DomainState, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO domains (id, name, state)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(DomainId::new())
        .bind(name.trim().to_lowercase())
        .bind(state)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    /// Point the domain's `role` reference at `contact_id`.
    ///
    /// Only contact saves call this; the last save for a role wins.
    pub async fn set_contact_reference(
        domain_id: DomainId,
        role: ContactType,
        contact_id: PublicContactId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let query = format!(
            "UPDATE domains SET {} = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
            reference_column(role)
        );
        sqlx::query_as::<_, Self>(&query)
            .bind(domain_id)
            .bind(contact_id)
            .fetch_one(conn)
            .await
            .map_err(Into::into)
    }

    /// The active contact for each filled role, in role order
    pub async fn contacts<'e>(&self, db: impl PgExecutor<'e>) -> Result<Vec<PublicContact>> {
        let ids: Vec<PublicContactId> = ContactType::ALL
            .iter()
            .filter_map(|role| self.contact_id(*role))
            .collect();

        let mut contacts = PublicContact::find_by_ids(&ids, db).await?;
        contacts.sort_by_key(|c| c.contact_type.position());
        Ok(contacts)
    }
}
