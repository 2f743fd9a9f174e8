use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;

use crate::common::DraftDomainId;

/// The name an applicant asked for; it only becomes a Domain on approval.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DraftDomain {
    pub id: DraftDomainId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftDomain {
    pub async fn find_by_id<'e>(id: DraftDomainId, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM draft_domains WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }

    pub async fn create<'e>(name: &str, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO draft_domains (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(DraftDomainId::new())
        .bind(name.trim().to_lowercase())
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }
}
