//! Submitting a draft application.

use tracing::{info, warn};

use crate::common::{ApplicationId, UserId};
use crate::domains::applications::activities::transition::{load_application, persist_status_change};
use crate::domains::applications::error::ApplicationError;
use crate::domains::applications::machines::ApplicationAction;
use crate::domains::applications::models::{ApplicationDetails, DomainApplication};
use crate::domains::applications::templates::SubmissionConfirmation;
use crate::kernel::{send_templated_email, BaseEmailService, ServerDeps};

/// Move a draft to SUBMITTED and send the submitter a confirmation.
///
/// The email is best effort: once the status change is committed a delivery
/// problem is only logged.
pub async fn submit_application(
    id: ApplicationId,
    actor_id: Option<UserId>,
    deps: &ServerDeps,
) -> Result<DomainApplication, ApplicationError> {
    let application = load_application(id, &deps.db_pool).await?;
    let change = application.plan(ApplicationAction::Submit)?;

    let mut details = ApplicationDetails::load(application, &deps.db_pool).await?;
    let missing = details.missing_for_submission();
    if !missing.is_empty() {
        return Err(ApplicationError::MissingFields(missing));
    }
    if !details.requested_domain_is_valid() {
        let name = details
            .requested_domain
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_default();
        return Err(ApplicationError::InvalidRequestedDomain(name));
    }

    let mut tx = deps.db_pool.begin().await?;
    let updated = persist_status_change(id, &change, None, actor_id, &mut *tx).await?;
    tx.commit().await?;

    info!(application_id = %id, from = %change.from, to = %change.to, "Domain application submitted");

    if change.sends_confirmation() {
        details.application = updated.clone();
        send_confirmation_email(&details, deps.email.as_ref()).await;
    }

    Ok(updated)
}

/// Email the submitter a summary of their application.
///
/// Never fails: a missing address or a delivery error is logged.
pub async fn send_confirmation_email(details: &ApplicationDetails, email: &dyn BaseEmailService) {
    let application_id = details.application.id;
    let Some(to) = details.submitter.as_ref().and_then(|s| s.email_address()) else {
        warn!(%application_id, "Cannot send confirmation email, no submitter email address");
        return;
    };

    let template = SubmissionConfirmation::new(details);
    if let Err(e) = send_templated_email(email, &template, to).await {
        warn!(%application_id, error = %e, "Failed to send confirmation email");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::applications::models::fixtures::completed;
    use crate::kernel::MockEmailService;

    #[tokio::test]
    async fn sends_to_submitter() {
        let email = MockEmailService::new();
        send_confirmation_email(&completed(), &email).await;

        let sent = email.sent_to("testy-admin@town.com");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "submission_confirmation");
        assert!(sent[0].body.contains("city.gov"));
    }

    #[tokio::test]
    async fn skips_without_submitter() {
        let email = MockEmailService::new();
        let mut details = completed();
        details.submitter = None;

        send_confirmation_email(&details, &email).await;
        assert!(email.sent().is_empty());
    }

    #[tokio::test]
    async fn skips_without_submitter_email() {
        let email = MockEmailService::new();
        let mut details = completed();
        if let Some(submitter) = details.submitter.as_mut() {
            submitter.email = None;
        }

        send_confirmation_email(&details, &email).await;
        assert!(email.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let email = MockEmailService::failing();
        send_confirmation_email(&completed(), &email).await;
        // attempted once, no panic, no error surfaced
        assert_eq!(email.sent().len(), 1);
    }
}
