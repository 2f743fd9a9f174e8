use tracing::{debug, warn};

use crate::common::UserId;
use crate::domains::invitations::activities::retrieve::retrieve;
use crate::domains::invitations::error::InvitationError;
use crate::domains::invitations::models::DomainInvitation;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Retrieve every open invitation addressed to a newly signed-in user.
///
/// One bad invitation does not stop the others; failures are logged.
pub async fn first_login(
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<DomainInvitation>, InvitationError> {
    let user = User::find_by_id(user_id, &deps.db_pool).await?;
    let Some(email) = user.email.as_deref().filter(|e| !e.trim().is_empty()) else {
        debug!(user_id = %user_id, "User has no email, no invitations to retrieve");
        return Ok(Vec::new());
    };

    let invitations = DomainInvitation::find_invited_for_email(email, &deps.db_pool).await?;

    let mut retrieved = Vec::with_capacity(invitations.len());
    for invitation in invitations {
        match retrieve(invitation.id, deps).await {
            Ok(invitation) => retrieved.push(invitation),
            Err(e) => warn!(
                invitation_id = %invitation.id,
                user_id = %user_id,
                error = %e,
                "Failed to retrieve invitation"
            ),
        }
    }
    Ok(retrieved)
}
