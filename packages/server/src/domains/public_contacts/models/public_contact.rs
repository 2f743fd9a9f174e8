use anyhow::Result;
use chrono::{DateTime, Utc};
use registry_client::{contact_payload, ContactPayload};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;

use crate::common::{DomainId, PublicContactId};

/// The four WHOIS roles a domain publishes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "contact_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Registrant,
    Administrative,
    Technical,
    Security,
}

impl ContactType {
    pub const ALL: [ContactType; 4] = [
        ContactType::Registrant,
        ContactType::Administrative,
        ContactType::Technical,
        ContactType::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Registrant => "registrant",
            ContactType::Administrative => "administrative",
            ContactType::Technical => "technical",
            ContactType::Security => "security",
        }
    }

    /// Sort key matching `ALL`
    pub fn position(&self) -> usize {
        match self {
            ContactType::Registrant => 0,
            ContactType::Administrative => 1,
            ContactType::Technical => 2,
            ContactType::Security => 3,
        }
    }
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "registrant" => Ok(ContactType::Registrant),
            "administrative" => Ok(ContactType::Administrative),
            "technical" => Ok(ContactType::Technical),
            "security" => Ok(ContactType::Security),
            _ => Err(anyhow::anyhow!("Invalid contact type: {}", s)),
        }
    }
}

/// Publishable WHOIS fields, as entered or taken from the defaults table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactFields {
    pub name: String,
    pub org: Option<String>,
    pub street1: String,
    pub street2: Option<String>,
    pub street3: Option<String>,
    pub city: String,
    /// State or province
    pub sp: String,
    /// Postal code
    pub pc: String,
    /// Two-letter country code
    pub cc: String,
    pub email: String,
    /// `+CC.NUMBER`
    pub voice: String,
    pub fax: Option<String>,
    pub pw: String,
}

/// A WHOIS contact attached to a domain
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PublicContact {
    pub id: PublicContactId,
    pub domain_id: DomainId,
    pub contact_type: ContactType,
    /// Registry-side key. Assigned once, never changes.
    pub registry_id: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: ContactFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A contact about to be saved: either a new one with a fresh registry id or
/// an edit of an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicContactDraft {
    pub domain_id: DomainId,
    pub contact_type: ContactType,
    pub registry_id: String,
    pub fields: ContactFields,
}

impl PublicContact {
    /// Start editing this contact, keeping its registry id
    pub fn to_draft(&self) -> PublicContactDraft {
        PublicContactDraft {
            domain_id: self.domain_id,
            contact_type: self.contact_type,
            registry_id: self.registry_id.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Registry representation of this contact
    pub fn to_payload(&self) -> ContactPayload {
        let f = &self.fields;
        contact_payload(
            &self.registry_id,
            &f.name,
            f.org.as_deref(),
            &[
                Some(f.street1.as_str()),
                f.street2.as_deref(),
                f.street3.as_deref(),
            ],
            &f.city,
            &f.sp,
            &f.pc,
            &f.cc,
            &f.email,
            &f.voice,
            f.fax.as_deref(),
            &f.pw,
        )
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PublicContact {
    pub async fn find_by_id<'e>(id: PublicContactId, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM public_contacts WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_registry_id<'e>(
        registry_id: &str,
        db: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM public_contacts WHERE registry_id = $1")
            .bind(registry_id)
            .fetch_optional(db)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_ids<'e>(
        ids: &[PublicContactId],
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM public_contacts WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(db)
            .await
            .map_err(Into::into)
    }

    /// Every contact ever saved for a domain, including superseded ones
    pub async fn find_for_domain<'e>(
        domain_id: DomainId,
        db: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM public_contacts WHERE domain_id = $1 ORDER BY created_at, id",
        )
        .bind(domain_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    /// Insert the draft, or update the row already holding its registry id.
    ///
    /// Returns `None` when that registry id belongs to another domain or role.
    pub async fn upsert<'e>(
        draft: &PublicContactDraft,
        db: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        let f = &draft.fields;
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO public_contacts (
                id, domain_id, contact_type, registry_id,
                name, org, street1, street2, street3, city, sp, pc, cc,
                email, voice, fax, pw
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (registry_id) DO UPDATE SET
                name = EXCLUDED.name,
                org = EXCLUDED.org,
                street1 = EXCLUDED.street1,
                street2 = EXCLUDED.street2,
                street3 = EXCLUDED.street3,
                city = EXCLUDED.city,
                sp = EXCLUDED.sp,
                pc = EXCLUDED.pc,
                cc = EXCLUDED.cc,
                email = EXCLUDED.email,
                voice = EXCLUDED.voice,
                fax = EXCLUDED.fax,
                pw = EXCLUDED.pw,
                updated_at = NOW()
            WHERE public_contacts.domain_id = EXCLUDED.domain_id
              AND public_contacts.contact_type = EXCLUDED.contact_type
            RETURNING *
            "#,
        )
        .bind(PublicContactId::new())
        .bind(draft.domain_id)
        .bind(draft.contact_type)
        .bind(&draft.registry_id)
        .bind(&f.name)
        .bind(&f.org)
        .bind(&f.street1)
        .bind(&f.street2)
        .bind(&f.street3)
        .bind(&f.city)
        .bind(&f.sp)
        .bind(&f.pc)
        .bind(&f.cc)
        .bind(&f.email)
        .bind(&f.voice)
        .bind(&f.fax)
        .bind(&f.pw)
        .fetch_optional(db)
        .await
        .map_err(Into::into)
    }
}
