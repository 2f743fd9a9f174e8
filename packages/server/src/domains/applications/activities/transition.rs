//! Persisting a decided status change.

use sqlx::{PgConnection, PgPool};

use crate::common::{ApplicationId, AuditEntry, UserId};
use crate::domains::applications::error::ApplicationError;
use crate::domains::applications::machines::StatusChange;
use crate::domains::applications::models::DomainApplication;

pub const AUDIT_ENTITY: &str = "domain_application";

pub async fn load_application(
    id: ApplicationId,
    pool: &PgPool,
) -> Result<DomainApplication, ApplicationError> {
    DomainApplication::find(id, pool)
        .await?
        .ok_or(ApplicationError::NotFound(id))
}

/// Write the change and its audit entry in the caller's transaction.
///
/// Fails with `Conflict` when the application left `change.from` after the
/// change was planned.
pub async fn persist_status_change(
    id: ApplicationId,
    change: &StatusChange,
    investigator_id: Option<UserId>,
    actor_id: Option<UserId>,
    conn: &mut PgConnection,
) -> Result<DomainApplication, ApplicationError> {
    let updated = DomainApplication::apply_status_change(id, change, investigator_id, &mut *conn)
        .await?
        .ok_or(ApplicationError::Conflict {
            expected: change.from,
        })?;

    AuditEntry::record(
        AUDIT_ENTITY,
        id,
        change.action.as_str(),
        Some(change.from.as_str()),
        Some(change.to.as_str()),
        actor_id,
        conn,
    )
    .await?;

    Ok(updated)
}
