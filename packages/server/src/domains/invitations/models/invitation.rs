use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgConnection;

use crate::common::{DomainId, InvitationId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "invitation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Invited,
    Retrieved,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Invited => "invited",
            InvitationStatus::Retrieved => "retrieved",
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emailed offer to manage a domain, waiting for the invitee to sign up
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DomainInvitation {
    pub id: InvitationId,
    pub email: String,
    pub domain_id: DomainId,
    status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainInvitation {
    pub fn status(&self) -> InvitationStatus {
        self.status
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl DomainInvitation {
    pub async fn find<'e>(id: InvitationId, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM domain_invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(Into::into)
    }

    /// Open invitations addressed to `email`, oldest first
    pub async fn find_invited_for_email<'e>(email: &str, db: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM domain_invitations
            WHERE LOWER(email) = LOWER($1) AND status = 'invited'
            ORDER BY created_at, id
            "#,
        )
        .bind(email.trim())
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_domain<'e>(domain_id: DomainId, db: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM domain_invitations WHERE domain_id = $1 ORDER BY created_at, id",
        )
        .bind(domain_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    /// Returns the invitation and whether this call created it.
    pub async fn get_or_create(
        email: &str,
        domain_id: DomainId,
        conn: &mut PgConnection,
    ) -> Result<(Self, bool)> {
        let email = email.trim().to_lowercase();

        let inserted = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO domain_invitations (id, email, domain_id, status)
            VALUES ($1, $2, $3, 'invited')
            ON CONFLICT (email, domain_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(InvitationId::new())
        .bind(&email)
        .bind(domain_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(invitation) = inserted {
            return Ok((invitation, true));
        }

        let existing = sqlx::query_as::<_, Self>(
            "SELECT * FROM domain_invitations WHERE email = $1 AND domain_id = $2",
        )
        .bind(&email)
        .bind(domain_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok((existing, false))
    }

    /// INVITED -> RETRIEVED. `None` if it was not INVITED any more.
    pub async fn mark_retrieved<'e>(id: InvitationId, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE domain_invitations
            SET status = 'retrieved', updated_at = NOW()
            WHERE id = $1 AND status = 'invited'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
impl DomainInvitation {
    pub fn fixture(status: InvitationStatus) -> Self {
        Self {
            id: InvitationId::new(),
            email: "invitee@town.com".to_string(),
            domain_id: DomainId::new(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
