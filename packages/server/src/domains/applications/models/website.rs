use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;

use crate::common::WebsiteId;

/// Free-text URL or domain (current websites, alternative domain ideas)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Website {
    pub id: WebsiteId,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Website {
    pub async fn create<'e>(website: &str, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO websites (id, website) VALUES ($1, $2) RETURNING *")
            .bind(WebsiteId::new())
            .bind(website.trim())
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }
}
