//! Review decisions on submitted applications.

use tracing::{error, info, warn};

use crate::common::{ApplicationId, UserId};
use crate::domains::applications::activities::transition::{load_application, persist_status_change};
use crate::domains::applications::error::ApplicationError;
use crate::domains::applications::machines::ApplicationAction;
use crate::domains::applications::models::{DomainApplication, DraftDomain};
use crate::domains::domain::models::{Domain, DomainState};
use crate::domains::public_contacts::provision_default_contacts;
use crate::domains::users::{DomainRole, UserDomainRole};
use crate::kernel::ServerDeps;

/// Assign an investigator and move SUBMITTED -> IN_REVIEW.
pub async fn begin_review(
    id: ApplicationId,
    investigator_id: Option<UserId>,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<DomainApplication, ApplicationError> {
    let investigator_id = investigator_id.ok_or(ApplicationError::InvestigatorRequired)?;

    let application = load_application(id, &deps.db_pool).await?;
    let change = application.plan(ApplicationAction::BeginReview)?;

    let mut tx = deps.db_pool.begin().await?;
    let updated =
        persist_status_change(id, &change, Some(investigator_id), actor_id, &mut *tx).await?;
    tx.commit().await?;

    info!(application_id = %id, investigator_id = %investigator_id, "Domain application in review");
    Ok(updated)
}

/// Approve the application and stand up its domain.
///
/// One transaction covers the status change, the new domain, the creator's
/// admin grant and the four default contacts. A registry failure while
/// pushing contacts rolls all of it back.
pub async fn approve(
    id: ApplicationId,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<(DomainApplication, Domain), ApplicationError> {
    let application = load_application(id, &deps.db_pool).await?;
    let change = application.plan(ApplicationAction::Approve)?;

    let requested_id = application
        .requested_domain_id
        .ok_or_else(|| ApplicationError::MissingFields(vec!["requested_domain"]))?;
    let requested = DraftDomain::find_by_id(requested_id, &deps.db_pool).await?;

    let mut tx = deps.db_pool.begin().await?;

    if Domain::exists_by_name(&requested.name, &mut *tx).await? {
        return Err(ApplicationError::DomainInUse(requested.name));
    }

    persist_status_change(id, &change, None, actor_id, &mut *tx).await?;

    // A concurrent approval of the same name can pass the check above; the
    // unique index on domains.name decides which one wins.
    let domain = match Domain::create(&requested.name, DomainState::Created, &mut *tx).await {
        Ok(domain) => domain,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApplicationError::DomainInUse(requested.name));
        }
        Err(e) => return Err(e.into()),
    };
    let updated = DomainApplication::set_approved_domain(id, domain.id, &mut *tx).await?;

    let (_, created) =
        UserDomainRole::get_or_create(application.creator_id, domain.id, DomainRole::Admin, &mut *tx)
            .await?;
    if !created {
        warn!(user_id = %application.creator_id, domain = %domain.name, "Creator already had a role on the new domain");
    }

    let contacts = provision_default_contacts(domain.id, deps.registry.as_ref(), &mut *tx).await?;

    // Contact references changed while provisioning
    let domain = Domain::find_by_id(domain.id, &mut *tx).await?;

    if let Err(e) = tx.commit().await {
        error!(
            application_id = %id,
            domain = %domain.name,
            registry_ids = ?contacts.iter().map(|c| c.registry_id.as_str()).collect::<Vec<_>>(),
            error = %e,
            "Contacts upserted at registry but approval commit failed"
        );
        return Err(e.into());
    }

    info!(application_id = %id, domain = %domain.name, "Domain application approved");
    Ok((updated, domain))
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}

/// SUBMITTED | IN_REVIEW -> REJECTED
pub async fn reject(
    id: ApplicationId,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<DomainApplication, ApplicationError> {
    close(id, ApplicationAction::Reject, actor_id, deps).await
}

/// SUBMITTED | IN_REVIEW -> WITHDRAWN
pub async fn withdraw(
    id: ApplicationId,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<DomainApplication, ApplicationError> {
    close(id, ApplicationAction::Withdraw, actor_id, deps).await
}

async fn close(
    id: ApplicationId,
    action: ApplicationAction,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<DomainApplication, ApplicationError> {
    let application = load_application(id, &deps.db_pool).await?;
    let change = application.plan(action)?;

    let mut tx = deps.db_pool.begin().await?;
    let updated = persist_status_change(id, &change, None, actor_id, &mut *tx).await?;
    tx.commit().await?;

    info!(application_id = %id, action = %action, to = %change.to, "Domain application closed");
    Ok(updated)
}
