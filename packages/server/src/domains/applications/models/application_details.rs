use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::domains::applications::models::{DomainApplication, DraftDomain, Website};
use crate::domains::contacts::Contact;
use crate::domains::domain::name::string_could_be_domain;

/// An application with its related people, names and websites loaded
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetails {
    pub application: DomainApplication,
    pub requested_domain: Option<DraftDomain>,
    pub authorizing_official: Option<Contact>,
    pub submitter: Option<Contact>,
    pub current_websites: Vec<Website>,
    pub alternative_domains: Vec<Website>,
    pub other_contacts: Vec<Contact>,
}

impl ApplicationDetails {
    pub async fn load(application: DomainApplication, pool: &PgPool) -> Result<Self> {
        let requested_domain = application.requested_domain(pool).await?;
        let authorizing_official = match application.authorizing_official_id {
            Some(id) => Some(Contact::find_by_id(id, pool).await?),
            None => None,
        };
        let submitter = match application.submitter_id {
            Some(id) => Some(Contact::find_by_id(id, pool).await?),
            None => None,
        };
        let current_websites = application.current_websites(pool).await?;
        let alternative_domains = application.alternative_domains(pool).await?;
        let other_contacts = application.other_contacts(pool).await?;

        Ok(Self {
            application,
            requested_domain,
            authorizing_official,
            submitter,
            current_websites,
            alternative_domains,
            other_contacts,
        })
    }

    /// Fields a submission cannot go without, in form order
    pub fn missing_for_submission(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.requested_domain.is_none() {
            missing.push("requested_domain");
        }
        if self.authorizing_official.is_none() {
            missing.push("authorizing_official");
        }
        if is_blank(&self.application.purpose) {
            missing.push("purpose");
        }
        if self.submitter.is_none() {
            missing.push("submitter");
        }
        missing
    }

    /// Is the requested name something we could register?
    pub fn requested_domain_is_valid(&self) -> bool {
        self.requested_domain
            .as_ref()
            .is_some_and(|d| string_could_be_domain(&d.name))
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::common::{ContactId, DraftDomainId, WebsiteId};
    use crate::domains::applications::models::{ApplicationStatus, OrganizationType};
    use chrono::Utc;

    pub fn contact(first: &str, last: &str, title: &str, email: &str, phone: &str) -> Contact {
        Contact {
            id: ContactId::new(),
            user_id: None,
            first_name: Some(first.to_string()),
            middle_name: None,
            last_name: Some(last.to_string()),
            title: Some(title.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn website(url: &str) -> Website {
        Website {
            id: WebsiteId::new(),
            website: url.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// A complete federal application for city.gov
    pub fn completed() -> ApplicationDetails {
        let mut app = DomainApplication::fixture(ApplicationStatus::Submitted);
        app.organization_type = Some(OrganizationType::Federal.to_string());
        app.federal_type = Some("executive".to_string());
        app.organization_name = Some("Testorg".to_string());
        app.address_line1 = Some("address 1".to_string());
        app.address_line2 = Some("address 2".to_string());
        app.state_territory = Some("NY".to_string());
        app.city = Some("NY".to_string());
        app.zipcode = Some("10002".to_string());
        app.purpose = Some("Purpose of the site".to_string());
        app.anything_else = Some("There is more".to_string());

        ApplicationDetails {
            application: app,
            requested_domain: Some(DraftDomain {
                id: DraftDomainId::new(),
                name: "city.gov".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
            authorizing_official: Some(contact("Testy", "Tester", "Chief Tester", "testy@town.com", "(555) 555 5555")),
            submitter: Some(contact("Testy2", "Tester2", "Admin Tester", "testy-admin@town.com", "(555) 555 5556")),
            current_websites: vec![website("city.com")],
            alternative_domains: vec![website("city1.gov")],
            other_contacts: vec![contact("Testy", "Tester", "Another Tester", "testy2@town.com", "(555) 555 5557")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::completed;

    #[test]
    fn complete_application_is_submittable() {
        let details = completed();
        assert!(details.missing_for_submission().is_empty());
        assert!(details.requested_domain_is_valid());
    }

    #[test]
    fn lists_every_missing_field() {
        let mut details = completed();
        details.requested_domain = None;
        details.submitter = None;
        details.application.purpose = Some("  ".to_string());

        assert_eq!(
            details.missing_for_submission(),
            vec!["requested_domain", "purpose", "submitter"]
        );
        assert!(!details.requested_domain_is_valid());
    }

    #[test]
    fn rejects_malformed_requested_domain() {
        let mut details = completed();
        if let Some(domain) = details.requested_domain.as_mut() {
            domain.name = "www.city.gov".to_string();
        }
        assert!(!details.requested_domain_is_valid());
    }
}
