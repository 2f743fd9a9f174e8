//! Test fixtures for creating test data.
//!
//! Everything shares one database, so names and emails carry a random suffix.

use registrar_core::common::UserId;
use registrar_core::domains::applications::{
    create_application, ApplicationDetails, ContactInput, NewApplication, OrganizationType,
};
use registrar_core::domains::domain::{Domain, DomainState};
use registrar_core::domains::users::{CreateUser, User};
use registrar_core::kernel::ServerDeps;
use sqlx::PgPool;
use uuid::Uuid;

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// A .gov name nobody else in the run will use
pub fn unique_domain_name() -> String {
    format!("city{}.gov", suffix())
}

pub fn unique_email() -> String {
    format!("user-{}@example.gov", suffix())
}

pub async fn create_user(pool: &PgPool) -> User {
    create_user_with_email(pool, &unique_email()).await
}

pub async fn create_user_with_email(pool: &PgPool, email: &str) -> User {
    let username = format!("user-{}", suffix());
    User::create(
        CreateUser::builder()
            .username(username.as_str())
            .email(Some(email))
            .first_name(Some("Testy"))
            .last_name(Some("Tester"))
            .build(),
        pool,
    )
    .await
    .expect("Failed to create user")
}

/// An existing domain with no contacts yet
pub async fn create_domain(pool: &PgPool) -> Domain {
    Domain::create(&unique_domain_name(), DomainState::Created, pool)
        .await
        .expect("Failed to create domain")
}

fn person(first: &str, email: &str, phone: &str) -> ContactInput {
    ContactInput {
        first_name: Some(first.to_string()),
        last_name: Some("Tester".to_string()),
        title: Some("Chief Tester".to_string()),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        ..Default::default()
    }
}

/// A form with every field submission needs, requesting `domain`
pub fn completed_form(domain: &str) -> NewApplication {
    NewApplication {
        organization_type: Some(OrganizationType::Federal),
        federal_type: Some("executive".to_string()),
        federal_agency: Some("General Services Administration".to_string()),
        is_election_board: Some(false),
        organization_name: Some("Testorg".to_string()),
        address_line1: Some("address 1".to_string()),
        city: Some("NYC".to_string()),
        state_territory: Some("NY".to_string()),
        zipcode: Some("10002".to_string()),
        authorizing_official: Some(person("Testy", "testy@town.com", "(555) 555 5555")),
        submitter: Some(person("Testy2", "testy-admin@town.com", "(555) 555 5556")),
        current_websites: vec!["city.com".to_string()],
        requested_domain: Some(domain.to_string()),
        alternative_domains: vec![format!("alt{}.gov", suffix())],
        purpose: Some("Purpose of the site".to_string()),
        other_contacts: vec![person("Testy3", "testy3@town.com", "(555) 555 5557")],
        anything_else: Some("There is more".to_string()),
        is_policy_acknowledged: Some(true),
        ..Default::default()
    }
}

/// A new user with a completed draft for a fresh domain name
pub async fn completed_application(deps: &ServerDeps) -> (User, ApplicationDetails) {
    let creator = create_user(&deps.db_pool).await;
    let details = create_application(
        creator.id,
        &completed_form(&unique_domain_name()),
        deps,
    )
    .await
    .expect("Failed to create application");
    (creator, details)
}

/// A reviewer account
pub async fn create_investigator(pool: &PgPool) -> UserId {
    create_user(pool).await.id
}
