//! Start a new application from a completed form.

use serde::Deserialize;
use tracing::info;

use crate::common::UserId;
use crate::domains::applications::error::ApplicationError;
use crate::domains::applications::models::{
    ApplicationDetails, CreateApplication, DomainApplication, DraftDomain, OrganizationType, Website,
};
use crate::domains::contacts::{Contact, CreateContact};
use crate::domains::domain::name;
use crate::kernel::ServerDeps;

/// A person as entered on the form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInput {
    fn as_create(&self) -> CreateContact<'_> {
        CreateContact::builder()
            .first_name(self.first_name.as_deref())
            .middle_name(self.middle_name.as_deref())
            .last_name(self.last_name.as_deref())
            .title(self.title.as_deref())
            .email(self.email.as_deref())
            .phone(self.phone.as_deref())
            .build()
    }
}

/// Everything the application form collects. Anything may be left blank
/// until submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewApplication {
    pub organization_type: Option<OrganizationType>,
    pub federally_recognized_tribe: Option<bool>,
    pub state_recognized_tribe: Option<bool>,
    pub tribe_name: Option<String>,
    pub federal_agency: Option<String>,
    pub federal_type: Option<String>,
    pub is_election_board: Option<bool>,
    pub organization_name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state_territory: Option<String>,
    pub zipcode: Option<String>,
    pub urbanization: Option<String>,
    pub type_of_work: Option<String>,
    pub more_organization_information: Option<String>,
    pub authorizing_official: Option<ContactInput>,
    pub submitter: Option<ContactInput>,
    pub current_websites: Vec<String>,
    pub requested_domain: Option<String>,
    pub alternative_domains: Vec<String>,
    pub purpose: Option<String>,
    pub other_contacts: Vec<ContactInput>,
    pub no_other_contacts_rationale: Option<String>,
    pub anything_else: Option<String>,
    pub is_policy_acknowledged: Option<bool>,
}

/// Store a new draft application and everything attached to it.
pub async fn create_application(
    creator_id: UserId,
    input: &NewApplication,
    deps: &ServerDeps,
) -> Result<ApplicationDetails, ApplicationError> {
    // Names are stored in canonical form: lowercase, with the .gov suffix.
    let requested_name = match input.requested_domain.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(canonical_domain(raw)?),
        _ => None,
    };
    let alternative_names = non_blank(&input.alternative_domains)
        .map(canonical_domain)
        .collect::<Result<Vec<_>, _>>()?;

    let mut tx = deps.db_pool.begin().await?;

    let authorizing_official = match &input.authorizing_official {
        Some(c) => Some(Contact::create(c.as_create(), &mut *tx).await?),
        None => None,
    };
    let submitter = match &input.submitter {
        Some(c) => Some(Contact::create(c.as_create(), &mut *tx).await?),
        None => None,
    };
    let requested_domain = match &requested_name {
        Some(name) => Some(DraftDomain::create(name, &mut *tx).await?),
        None => None,
    };

    let application = DomainApplication::create(
        CreateApplication::builder()
            .creator_id(creator_id)
            .organization_type(input.organization_type)
            .federally_recognized_tribe(input.federally_recognized_tribe)
            .state_recognized_tribe(input.state_recognized_tribe)
            .tribe_name(input.tribe_name.as_deref())
            .federal_agency(input.federal_agency.as_deref())
            .federal_type(input.federal_type.as_deref())
            .is_election_board(input.is_election_board)
            .organization_name(input.organization_name.as_deref())
            .address_line1(input.address_line1.as_deref())
            .address_line2(input.address_line2.as_deref())
            .city(input.city.as_deref())
            .state_territory(input.state_territory.as_deref())
            .zipcode(input.zipcode.as_deref())
            .urbanization(input.urbanization.as_deref())
            .type_of_work(input.type_of_work.as_deref())
            .more_organization_information(input.more_organization_information.as_deref())
            .authorizing_official_id(authorizing_official.as_ref().map(|c| c.id))
            .submitter_id(submitter.as_ref().map(|c| c.id))
            .requested_domain_id(requested_domain.as_ref().map(|d| d.id))
            .purpose(input.purpose.as_deref())
            .no_other_contacts_rationale(input.no_other_contacts_rationale.as_deref())
            .anything_else(input.anything_else.as_deref())
            .is_policy_acknowledged(input.is_policy_acknowledged)
            .build(),
        &mut *tx,
    )
    .await?;

    let mut current_websites = Vec::new();
    for (position, url) in non_blank(&input.current_websites).enumerate() {
        let website = Website::create(url, &mut *tx).await?;
        DomainApplication::add_current_website(application.id, website.id, position as i32, &mut *tx)
            .await?;
        current_websites.push(website);
    }

    let mut alternative_domains = Vec::new();
    for (position, name) in alternative_names.iter().enumerate() {
        let website = Website::create(name, &mut *tx).await?;
        DomainApplication::add_alternative_domain(application.id, website.id, position as i32, &mut *tx)
            .await?;
        alternative_domains.push(website);
    }

    let mut other_contacts = Vec::new();
    for (position, input) in input.other_contacts.iter().enumerate() {
        let contact = Contact::create(input.as_create(), &mut *tx).await?;
        DomainApplication::add_other_contact(application.id, contact.id, position as i32, &mut *tx)
            .await?;
        other_contacts.push(contact);
    }

    tx.commit().await?;

    info!(application_id = %application.id, creator_id = %creator_id, "Domain application created");

    Ok(ApplicationDetails {
        application,
        requested_domain,
        authorizing_official,
        submitter,
        current_websites,
        alternative_domains,
        other_contacts,
    })
}

fn canonical_domain(raw: &str) -> Result<String, ApplicationError> {
    name::normalize(raw)
        .map(|label| name::fqdn(&label))
        .map_err(|reason| ApplicationError::InvalidDomainName {
            name: raw.to_string(),
            reason,
        })
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}
