//! Append-only audit trail for status changes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::common::{AuditLogId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: AuditLogId,
    pub entity: String,
    pub entity_id: Uuid,
    pub action: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub actor_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Record a status change inside the caller's transaction.
    pub async fn record(
        entity: &str,
        entity_id: impl Into<Uuid>,
        action: &str,
        from_status: Option<&str>,
        to_status: Option<&str>,
        actor_id: Option<UserId>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let entry = sqlx::query_as::<_, AuditEntry>(
            r#"
            INSERT INTO audit_log (id, entity, entity_id, action, from_status, to_status, actor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(AuditLogId::new())
        .bind(entity)
        .bind(entity_id.into())
        .bind(action)
        .bind(from_status)
        .bind(to_status)
        .bind(actor_id)
        .fetch_one(conn)
        .await?;
        Ok(entry)
    }

    /// History of one entity, oldest first
    pub async fn find_for_entity(
        entity: &str,
        entity_id: impl Into<Uuid>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, AuditEntry>(
            "SELECT * FROM audit_log WHERE entity = $1 AND entity_id = $2 ORDER BY created_at, id",
        )
        .bind(entity)
        .bind(entity_id.into())
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }
}
