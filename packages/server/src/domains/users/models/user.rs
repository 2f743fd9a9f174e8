use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::UserId;

/// A registered account. Identity federation happens upstream; by the time a
/// user reaches us we only know their username and (usually) an email.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateUser<'a> {
    pub username: &'a str,
    #[builder(default)]
    pub email: Option<&'a str>,
    #[builder(default)]
    pub first_name: Option<&'a str>,
    #[builder(default)]
    pub last_name: Option<&'a str>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    pub async fn find_by_id<'e>(id: UserId, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }

    /// Emails are matched case-insensitively; the oldest account wins.
    pub async fn find_by_email<'e>(email: &str, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM users
            WHERE LOWER(email) = LOWER($1)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(email.trim())
        .fetch_optional(db)
        .await
        .map_err(Into::into)
    }

    pub async fn create<'e>(input: CreateUser<'_>, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(input.username)
        .bind(input.email)
        .bind(input.first_name)
        .bind(input.last_name)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }
}
