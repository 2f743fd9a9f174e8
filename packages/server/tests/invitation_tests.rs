//! Integration tests for domain invitations: inviting, retrieving on first
//! login, and the guards around both.

mod common;

use crate::common::*;
use registrar_core::common::{AuditEntry, InvitationId};
use registrar_core::domains::invitations::activities::retrieve::AUDIT_ENTITY;
use registrar_core::domains::invitations::{
    first_login, invite, retrieve, DomainInvitation, InvitationError, InvitationStatus,
    InviteOutcome,
};
use registrar_core::domains::users::{DomainRole, UserDomainRole};
use test_context::test_context;

async fn invitation_for(ctx: &TestHarness, email: &str) -> DomainInvitation {
    let domain = create_domain(&ctx.db_pool).await;
    let mut conn = ctx.db_pool.acquire().await.unwrap();
    let (invitation, created) = DomainInvitation::get_or_create(email, domain.id, &mut *conn)
        .await
        .unwrap();
    assert!(created);
    invitation
}

// =============================================================================
// Retrieve
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn retrieve_grants_admin_and_closes_invitation(ctx: &TestHarness) {
    let email = unique_email();
    let user = create_user_with_email(&ctx.db_pool, &email).await;
    let invitation = invitation_for(ctx, &email).await;

    let retrieved = retrieve(invitation.id, &ctx.deps).await.expect("retrieve");

    assert_eq!(retrieved.status(), InvitationStatus::Retrieved);
    let roles = UserDomainRole::find_for_user(user.id, &ctx.db_pool).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].domain_id, invitation.domain_id);
    assert_eq!(roles[0].role, DomainRole::Admin);

    let history = AuditEntry::find_for_entity(AUDIT_ENTITY, invitation.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_status.as_deref(), Some("invited"));
    assert_eq!(history[0].to_status.as_deref(), Some("retrieved"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn retrieve_without_account_leaves_invitation_open(ctx: &TestHarness) {
    let email = unique_email();
    let invitation = invitation_for(ctx, &email).await;

    let err = retrieve(invitation.id, &ctx.deps).await.unwrap_err();

    assert!(matches!(err, InvitationError::UserNotFound { email: ref e } if e == &email));
    let reloaded = DomainInvitation::find(invitation.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status(), InvitationStatus::Invited);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn retrieve_matches_email_case_insensitively(ctx: &TestHarness) {
    let email = unique_email();
    let user = create_user_with_email(&ctx.db_pool, &email.to_uppercase()).await;
    let invitation = invitation_for(ctx, &email).await;

    retrieve(invitation.id, &ctx.deps).await.unwrap();

    let roles = UserDomainRole::find_for_user(user.id, &ctx.db_pool).await.unwrap();
    assert_eq!(roles.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn retrieve_with_existing_role_keeps_a_single_grant(ctx: &TestHarness) {
    let email = unique_email();
    let user = create_user_with_email(&ctx.db_pool, &email).await;
    let invitation = invitation_for(ctx, &email).await;

    let mut conn = ctx.db_pool.acquire().await.unwrap();
    UserDomainRole::get_or_create(user.id, invitation.domain_id, DomainRole::Admin, &mut *conn)
        .await
        .unwrap();
    drop(conn);

    let (logs, _guard) = CapturedLogs::capture();
    let retrieved = retrieve(invitation.id, &ctx.deps).await.unwrap();

    assert_eq!(retrieved.status(), InvitationStatus::Retrieved);
    let roles = UserDomainRole::find_for_domain(invitation.domain_id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(roles.len(), 1);

    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("Invitation retrieved for a user who already had a role on this domain"));
    assert!(warnings[0].contains(&invitation.id.to_string()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn retrieving_twice_fails(ctx: &TestHarness) {
    let email = unique_email();
    create_user_with_email(&ctx.db_pool, &email).await;
    let invitation = invitation_for(ctx, &email).await;

    retrieve(invitation.id, &ctx.deps).await.unwrap();
    let err = retrieve(invitation.id, &ctx.deps).await.unwrap_err();

    assert!(matches!(err, InvitationError::AlreadyRetrieved(id) if id == invitation.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_invitation_is_not_found(ctx: &TestHarness) {
    let id = InvitationId::new();
    let err = retrieve(id, &ctx.deps).await.unwrap_err();
    assert!(matches!(err, InvitationError::NotFound(missing) if missing == id));
}

// =============================================================================
// Invite
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn inviting_existing_user_grants_access_without_email(ctx: &TestHarness) {
    let domain = create_domain(&ctx.db_pool).await;
    let user = create_user(&ctx.db_pool).await;
    let email = user.email.clone().unwrap();

    let outcome = invite(domain.id, &email, &ctx.deps).await.unwrap();

    match outcome {
        InviteOutcome::Granted { grant } => {
            assert_eq!(grant.user_id, user.id);
            assert_eq!(grant.domain_id, domain.id);
        }
        other => panic!("expected a grant, got {other:?}"),
    }
    assert!(ctx.mocks.email.sent().is_empty());

    let err = invite(domain.id, &email, &ctx.deps).await.unwrap_err();
    assert!(matches!(err, InvitationError::AlreadyManager { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn inviting_new_email_creates_invitation_and_sends_email(ctx: &TestHarness) {
    let domain = create_domain(&ctx.db_pool).await;
    let email = unique_email();

    let outcome = invite(domain.id, &format!("  {}  ", email.to_uppercase()), &ctx.deps)
        .await
        .unwrap();

    let invitation = match outcome {
        InviteOutcome::Invited { invitation } => invitation,
        other => panic!("expected an invitation, got {other:?}"),
    };
    assert_eq!(invitation.email, email);
    assert_eq!(invitation.status(), InvitationStatus::Invited);

    let sent = ctx.mocks.email.sent_to(&email);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, "domain_invitation");
    assert!(sent[0].body.contains(&domain.name));

    let err = invite(domain.id, &email, &ctx.deps).await.unwrap_err();
    assert!(matches!(err, InvitationError::AlreadyInvited { .. }));
    assert_eq!(ctx.mocks.email.sent().len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invitation_survives_email_failure(ctx: &TestHarness) {
    let domain = create_domain(&ctx.db_pool).await;
    ctx.mocks.email.set_failing(true);

    let outcome = invite(domain.id, &unique_email(), &ctx.deps).await.unwrap();

    assert!(matches!(outcome, InviteOutcome::Invited { .. }));
    let open = DomainInvitation::find_for_domain(domain.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invite_rejects_bad_email_and_unknown_domain(ctx: &TestHarness) {
    let domain = create_domain(&ctx.db_pool).await;
    assert!(matches!(
        invite(domain.id, "not-an-email", &ctx.deps).await,
        Err(InvitationError::InvalidEmail(_))
    ));

    let missing = registrar_core::common::DomainId::new();
    assert!(matches!(
        invite(missing, &unique_email(), &ctx.deps).await,
        Err(InvitationError::DomainNotFound(id)) if id == missing
    ));
}

// =============================================================================
// First login
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn first_login_retrieves_every_open_invitation(ctx: &TestHarness) {
    let email = unique_email();
    let first = invitation_for(ctx, &email).await;
    let second = invitation_for(ctx, &email).await;

    let user = create_user_with_email(&ctx.db_pool, &email).await;
    let retrieved = first_login(user.id, &ctx.deps).await.unwrap();

    assert_eq!(retrieved.len(), 2);
    assert!(retrieved
        .iter()
        .all(|i| i.status() == InvitationStatus::Retrieved));

    let mut domains: Vec<_> = UserDomainRole::find_for_user(user.id, &ctx.db_pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.domain_id)
        .collect();
    domains.sort();
    let mut expected = vec![first.domain_id, second.domain_id];
    expected.sort();
    assert_eq!(domains, expected);

    // Nothing left to pick up on the next login
    assert!(first_login(user.id, &ctx.deps).await.unwrap().is_empty());
}
