use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgConnection;

use crate::common::{DomainId, UserDomainRoleId, UserId};

/// Access level a user holds on a domain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "domain_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DomainRole {
    Admin,
}

impl std::fmt::Display for DomainRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainRole::Admin => write!(f, "admin"),
        }
    }
}

/// One grant per (user, domain)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDomainRole {
    pub id: UserDomainRoleId,
    pub user_id: UserId,
    pub domain_id: DomainId,
    pub role: DomainRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDomainRole {
    /// Grant `role` unless the user already holds one on this domain.
    ///
    /// Returns the grant and whether this call created it.
    pub async fn get_or_create(
        user_id: UserId,
        domain_id: DomainId,
        role: DomainRole,
        conn: &mut PgConnection,
    ) -> Result<(Self, bool)> {
        let inserted = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO user_domain_roles (id, user_id, domain_id, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, domain_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(UserDomainRoleId::new())
        .bind(user_id)
        .bind(domain_id)
        .bind(role)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(grant) = inserted {
            return Ok((grant, true));
        }

        let existing = sqlx::query_as::<_, Self>(
            "SELECT * FROM user_domain_roles WHERE user_id = $1 AND domain_id = $2",
        )
        .bind(user_id)
        .bind(domain_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok((existing, false))
    }

    pub async fn find_for_domain<'e>(domain_id: DomainId, db: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM user_domain_roles WHERE domain_id = $1 ORDER BY created_at",
        )
        .bind(domain_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_user<'e>(user_id: UserId, db: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM user_domain_roles WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }
}
