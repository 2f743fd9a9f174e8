//! Adding a manager to a domain by email.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::DomainId;
use crate::domains::domain::models::Domain;
use crate::domains::invitations::error::InvitationError;
use crate::domains::invitations::models::DomainInvitation;
use crate::domains::invitations::templates::DomainInvitationEmail;
use crate::domains::users::{DomainRole, User, UserDomainRole};
use crate::kernel::{send_templated_email, ServerDeps};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InviteOutcome {
    /// The email belongs to an existing account, which now has access
    Granted { grant: UserDomainRole },
    /// No account yet; an invitation was created and emailed
    Invited { invitation: DomainInvitation },
}

/// Give `email` admin access to a domain, inviting them if they have no account.
pub async fn invite(
    domain_id: DomainId,
    email: &str,
    deps: &ServerDeps,
) -> Result<InviteOutcome, InvitationError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(InvitationError::InvalidEmail(email.to_string()));
    }

    let domain = Domain::find(domain_id, &deps.db_pool)
        .await?
        .ok_or(InvitationError::DomainNotFound(domain_id))?;

    let mut tx = deps.db_pool.begin().await?;

    if let Some(user) = User::find_by_email(email, &mut *tx).await? {
        let (grant, created) =
            UserDomainRole::get_or_create(user.id, domain.id, DomainRole::Admin, &mut *tx).await?;
        if !created {
            return Err(InvitationError::AlreadyManager {
                email: email.to_string(),
            });
        }
        tx.commit().await?;

        info!(user_id = %user.id, domain = %domain.name, "Added existing user as domain manager");
        return Ok(InviteOutcome::Granted { grant });
    }

    let (invitation, created) = DomainInvitation::get_or_create(email, domain.id, &mut *tx).await?;
    if !created {
        return Err(InvitationError::AlreadyInvited {
            email: email.to_string(),
        });
    }
    tx.commit().await?;

    info!(invitation_id = %invitation.id, domain = %domain.name, "Domain invitation created");

    let template = DomainInvitationEmail {
        domain_name: &domain.name,
        email: &invitation.email,
    };
    if let Err(e) = send_templated_email(deps.email.as_ref(), &template, &invitation.email).await {
        warn!(
            invitation_id = %invitation.id,
            domain = %domain.name,
            error = %e,
            "Could not send email invitation"
        );
    }

    Ok(InviteOutcome::Invited { invitation })
}
