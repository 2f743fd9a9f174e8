//! Turning an invitation into an access grant.

use sqlx::PgConnection;
use tracing::{info, warn};

use crate::common::{AuditEntry, InvitationId, UserId};
use crate::domains::invitations::error::InvitationError;
use crate::domains::invitations::models::{DomainInvitation, InvitationStatus};
use crate::domains::users::{DomainRole, User, UserDomainRole};
use crate::kernel::ServerDeps;

pub const AUDIT_ENTITY: &str = "domain_invitation";

/// Give the invitee admin access to the domain and close the invitation.
///
/// Requires an account with the invited email; without one the invitation
/// stays INVITED.
pub async fn retrieve(
    id: InvitationId,
    deps: &ServerDeps,
) -> Result<DomainInvitation, InvitationError> {
    let invitation = DomainInvitation::find(id, &deps.db_pool)
        .await?
        .ok_or(InvitationError::NotFound(id))?;
    invitation.plan_retrieve()?;

    let mut tx = deps.db_pool.begin().await?;
    let (retrieved, user_id) = retrieve_in(&invitation, &mut *tx).await?;
    tx.commit().await?;

    info!(invitation_id = %id, user_id = %user_id, domain_id = %retrieved.domain_id, "Domain invitation retrieved");
    Ok(retrieved)
}

async fn retrieve_in(
    invitation: &DomainInvitation,
    conn: &mut PgConnection,
) -> Result<(DomainInvitation, UserId), InvitationError> {
    let user = User::find_by_email(&invitation.email, &mut *conn)
        .await?
        .ok_or_else(|| InvitationError::UserNotFound {
            email: invitation.email.clone(),
        })?;

    let (_, created) =
        UserDomainRole::get_or_create(user.id, invitation.domain_id, DomainRole::Admin, &mut *conn)
            .await?;
    if !created {
        warn!(
            invitation_id = %invitation.id,
            user_id = %user.id,
            domain_id = %invitation.domain_id,
            "Invitation retrieved for a user who already had a role on this domain"
        );
    }

    let retrieved = DomainInvitation::mark_retrieved(invitation.id, &mut *conn)
        .await?
        .ok_or(InvitationError::AlreadyRetrieved(invitation.id))?;

    AuditEntry::record(
        AUDIT_ENTITY,
        invitation.id,
        "retrieve",
        Some(InvitationStatus::Invited.as_str()),
        Some(InvitationStatus::Retrieved.as_str()),
        Some(user.id),
        conn,
    )
    .await?;

    Ok((retrieved, user.id))
}
