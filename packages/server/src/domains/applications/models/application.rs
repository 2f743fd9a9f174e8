use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgConnection;
use typed_builder::TypedBuilder;

use crate::common::{
    ApplicationId, ContactId, DomainId, DraftDomainId, UserId, WebsiteId,
};
use crate::domains::applications::machines::{self, ApplicationAction, StatusChange, TransitionError};
use crate::domains::applications::models::{DraftDomain, Website};
use crate::domains::contacts::Contact;

/// Application status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    InReview,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Approved | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of government organization applying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Federal,
    Interstate,
    StateOrTerritory,
    Tribal,
    County,
    City,
    SpecialDistrict,
    SchoolDistrict,
}

impl OrganizationType {
    /// Label shown to applicants
    pub fn label(&self) -> &'static str {
        match self {
            OrganizationType::Federal => "Federal: an agency of the U.S. government's executive, legislative, or judicial branches",
            OrganizationType::Interstate => "Interstate: an organization of two or more states",
            OrganizationType::StateOrTerritory => "State or territory: one of the 50 U.S. states, the District of Columbia, American Samoa, Guam, Northern Mariana Islands, Puerto Rico, or the U.S. Virgin Islands",
            OrganizationType::Tribal => "Tribal: a tribal government recognized by the federal or a state government",
            OrganizationType::County => "County: a county, parish, or borough",
            OrganizationType::City => "City: a city, town, township, village, etc.",
            OrganizationType::SpecialDistrict => "Special district: an independent organization within a single state",
            OrganizationType::SchoolDistrict => "School district: a school district that is not part of a local government",
        }
    }
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationType::Federal => write!(f, "federal"),
            OrganizationType::Interstate => write!(f, "interstate"),
            OrganizationType::StateOrTerritory => write!(f, "state_or_territory"),
            OrganizationType::Tribal => write!(f, "tribal"),
            OrganizationType::County => write!(f, "county"),
            OrganizationType::City => write!(f, "city"),
            OrganizationType::SpecialDistrict => write!(f, "special_district"),
            OrganizationType::SchoolDistrict => write!(f, "school_district"),
        }
    }
}

impl std::str::FromStr for OrganizationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "federal" => Ok(OrganizationType::Federal),
            "interstate" => Ok(OrganizationType::Interstate),
            "state_or_territory" => Ok(OrganizationType::StateOrTerritory),
            "tribal" => Ok(OrganizationType::Tribal),
            "county" => Ok(OrganizationType::County),
            "city" => Ok(OrganizationType::City),
            "special_district" => Ok(OrganizationType::SpecialDistrict),
            "school_district" => Ok(OrganizationType::SchoolDistrict),
            _ => Err(anyhow::anyhow!("Invalid organization type: {}", s)),
        }
    }
}

/// A request for a .gov domain and everything the applicant told us.
///
/// `status` is private: it only changes through [`DomainApplication::plan`]
/// and a persisted [`StatusChange`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DomainApplication {
    pub id: ApplicationId,
    status: ApplicationStatus,
    pub creator_id: UserId,
    pub investigator_id: Option<UserId>,

    // Organization
    pub organization_type: Option<String>, // see OrganizationType
    pub federally_recognized_tribe: Option<bool>,
    pub state_recognized_tribe: Option<bool>,
    pub tribe_name: Option<String>,
    pub federal_agency: Option<String>,
    pub federal_type: Option<String>, // 'executive', 'judicial', 'legislative'
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

    // People
    pub authorizing_official_id: Option<ContactId>,
    pub submitter_id: Option<ContactId>,

    // Domain
    pub requested_domain_id: Option<DraftDomainId>,
    pub approved_domain_id: Option<DomainId>,
    pub purpose: Option<String>,

    pub no_other_contacts_rationale: Option<String>,
    pub anything_else: Option<String>,
    pub is_policy_acknowledged: Option<bool>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateApplication<'a> {
    pub creator_id: UserId,
    #[builder(default)]
    pub organization_type: Option<OrganizationType>,
    #[builder(default)]
    pub federally_recognized_tribe: Option<bool>,
    #[builder(default)]
    pub state_recognized_tribe: Option<bool>,
    #[builder(default)]
    pub tribe_name: Option<&'a str>,
    #[builder(default)]
    pub federal_agency: Option<&'a str>,
    #[builder(default)]
    pub federal_type: Option<&'a str>,
    #[builder(default)]
    pub is_election_board: Option<bool>,
    #[builder(default)]
    pub organization_name: Option<&'a str>,
    #[builder(default)]
    pub address_line1: Option<&'a str>,
    #[builder(default)]
    pub address_line2: Option<&'a str>,
    #[builder(default)]
    pub city: Option<&'a str>,
    #[builder(default)]
    pub state_territory: Option<&'a str>,
    #[builder(default)]
    pub zipcode: Option<&'a str>,
    #[builder(default)]
    pub urbanization: Option<&'a str>,
    #[builder(default)]
    pub type_of_work: Option<&'a str>,
    #[builder(default)]
    pub more_organization_information: Option<&'a str>,
    #[builder(default)]
    pub authorizing_official_id: Option<ContactId>,
    #[builder(default)]
    pub submitter_id: Option<ContactId>,
    #[builder(default)]
    pub requested_domain_id: Option<DraftDomainId>,
    #[builder(default)]
    pub purpose: Option<&'a str>,
    #[builder(default)]
    pub no_other_contacts_rationale: Option<&'a str>,
    #[builder(default)]
    pub anything_else: Option<&'a str>,
    #[builder(default)]
    pub is_policy_acknowledged: Option<bool>,
}

impl DomainApplication {
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Decide whether `action` is allowed from the current status
    pub fn plan(&self, action: ApplicationAction) -> Result<StatusChange, TransitionError> {
        machines::decide(self.status, action)
    }

    pub fn organization_type(&self) -> Option<OrganizationType> {
        self.organization_type.as_deref().and_then(|t| t.parse().ok())
    }

    // =========================================================================
    // Form policies
    // =========================================================================

    pub fn show_organization_federal(&self) -> bool {
        self.organization_type() == Some(OrganizationType::Federal)
    }

    pub fn show_tribal_government(&self) -> bool {
        self.organization_type() == Some(OrganizationType::Tribal)
    }

    /// Every answer except federal, interstate and school district
    pub fn show_organization_election(&self) -> bool {
        matches!(
            self.organization_type(),
            Some(t) if !matches!(
                t,
                OrganizationType::Federal | OrganizationType::Interstate | OrganizationType::SchoolDistrict
            )
        )
    }

    pub fn show_type_of_work(&self) -> bool {
        matches!(
            self.organization_type(),
            Some(OrganizationType::SpecialDistrict | OrganizationType::Interstate)
        )
    }

    /// `None` until an organization type is chosen
    pub fn is_federal(&self) -> Option<bool> {
        self.organization_type()
            .map(|t| t == OrganizationType::Federal)
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl DomainApplication {
    pub async fn find<'e>(id: ApplicationId, db: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM domain_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_creator<'e>(creator_id: UserId, db: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM domain_applications WHERE creator_id = $1 ORDER BY created_at DESC",
        )
        .bind(creator_id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn create<'e>(input: CreateApplication<'_>, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO domain_applications (
                id, status, creator_id,
                organization_type, federally_recognized_tribe, state_recognized_tribe,
                tribe_name, federal_agency, federal_type, is_election_board,
                organization_name, address_line1, address_line2, city,
                state_territory, zipcode, urbanization,
                type_of_work, more_organization_information,
                authorizing_official_id, submitter_id, requested_domain_id,
                purpose, no_other_contacts_rationale, anything_else, is_policy_acknowledged
            )
            VALUES (
                $1, 'draft', $2,
                $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13,
                $14, $15, $16,
                $17, $18,
                $19, $20, $21,
                $22, $23, $24, $25
            )
            RETURNING *
            "#,
        )
        .bind(ApplicationId::new())
        .bind(input.creator_id)
        .bind(input.organization_type.map(|t| t.to_string()))
        .bind(input.federally_recognized_tribe)
        .bind(input.state_recognized_tribe)
        .bind(input.tribe_name)
        .bind(input.federal_agency)
        .bind(input.federal_type)
        .bind(input.is_election_board)
        .bind(input.organization_name)
        .bind(input.address_line1)
        .bind(input.address_line2)
        .bind(input.city)
        .bind(input.state_territory)
        .bind(input.zipcode)
        .bind(input.urbanization)
        .bind(input.type_of_work)
        .bind(input.more_organization_information)
        .bind(input.authorizing_official_id)
        .bind(input.submitter_id)
        .bind(input.requested_domain_id)
        .bind(input.purpose)
        .bind(input.no_other_contacts_rationale)
        .bind(input.anything_else)
        .bind(input.is_policy_acknowledged)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    /// Persist a planned transition, but only if nobody moved the
    /// application since it was planned.
    ///
    /// Returns `None` when the row is no longer in `change.from`.
    pub async fn apply_status_change<'e>(
        id: ApplicationId,
        change: &StatusChange,
        investigator_id: Option<UserId>,
        db: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE domain_applications
            SET status = $3,
                investigator_id = COALESCE($4, investigator_id),
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.from)
        .bind(change.to)
        .bind(investigator_id)
        .fetch_optional(db)
        .await
        .map_err(Into::into)
    }

    pub async fn set_approved_domain<'e>(
        id: ApplicationId,
        domain_id: DomainId,
        db: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE domain_applications
            SET approved_domain_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(domain_id)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }

    // =========================================================================
    // Related records (ordered as entered)
    // =========================================================================

    pub async fn add_current_website(
        id: ApplicationId,
        website_id: WebsiteId,
        position: i32,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO domain_application_current_websites (application_id, website_id, position) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(website_id)
        .bind(position)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn add_alternative_domain(
        id: ApplicationId,
        website_id: WebsiteId,
        position: i32,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO domain_application_alternative_domains (application_id, website_id, position) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(website_id)
        .bind(position)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn add_other_contact(
        id: ApplicationId,
        contact_id: ContactId,
        position: i32,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO domain_application_other_contacts (application_id, contact_id, position) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(contact_id)
        .bind(position)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn current_websites<'e>(&self, db: impl PgExecutor<'e>) -> Result<Vec<Website>> {
        sqlx::query_as::<_, Website>(
            r#"
            SELECT w.* FROM websites w
            JOIN domain_application_current_websites j ON j.website_id = w.id
            WHERE j.application_id = $1
            ORDER BY j.position, w.created_at
            "#,
        )
        .bind(self.id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn alternative_domains<'e>(&self, db: impl PgExecutor<'e>) -> Result<Vec<Website>> {
        sqlx::query_as::<_, Website>(
            r#"
            SELECT w.* FROM websites w
            JOIN domain_application_alternative_domains j ON j.website_id = w.id
            WHERE j.application_id = $1
            ORDER BY j.position, w.created_at
            "#,
        )
        .bind(self.id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn other_contacts<'e>(&self, db: impl PgExecutor<'e>) -> Result<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            r#"
            SELECT c.* FROM contacts c
            JOIN domain_application_other_contacts j ON j.contact_id = c.id
            WHERE j.application_id = $1
            ORDER BY j.position, c.created_at
            "#,
        )
        .bind(self.id)
        .fetch_all(db)
        .await
        .map_err(Into::into)
    }

    pub async fn requested_domain<'e>(&self, db: impl PgExecutor<'e>) -> Result<Option<DraftDomain>> {
        match self.requested_domain_id {
            Some(id) => DraftDomain::find_by_id(id, db).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
impl DomainApplication {
    /// An in-memory application for unit tests
    pub fn fixture(status: ApplicationStatus) -> Self {
        Self {
            id: ApplicationId::new(),
            status,
            creator_id: UserId::new(),
            investigator_id: None,
            organization_type: None,
            federally_recognized_tribe: None,
            state_recognized_tribe: None,
            tribe_name: None,
            federal_agency: None,
            federal_type: None,
            is_election_board: None,
            organization_name: None,
            address_line1: None,
            address_line2: None,
            city: None,
            state_territory: None,
            zipcode: None,
            urbanization: None,
            type_of_work: None,
            more_organization_information: None,
            authorizing_official_id: None,
            submitter_id: None,
            requested_domain_id: None,
            approved_domain_id: None,
            purpose: None,
            no_other_contacts_rationale: None,
            anything_else: None,
            is_policy_acknowledged: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_type(t: Option<OrganizationType>) -> DomainApplication {
        let mut app = DomainApplication::fixture(ApplicationStatus::Draft);
        app.organization_type = t.map(|t| t.to_string());
        app
    }

    #[test]
    fn federal_policies() {
        let app = with_type(Some(OrganizationType::Federal));
        assert!(app.show_organization_federal());
        assert!(!app.show_organization_election());
        assert!(!app.show_type_of_work());
        assert_eq!(app.is_federal(), Some(true));
    }

    #[test]
    fn election_board_question_skips_school_districts() {
        assert!(with_type(Some(OrganizationType::City)).show_organization_election());
        assert!(with_type(Some(OrganizationType::Tribal)).show_organization_election());
        assert!(!with_type(Some(OrganizationType::SchoolDistrict)).show_organization_election());
        assert!(!with_type(Some(OrganizationType::Interstate)).show_organization_election());
        assert!(!with_type(None).show_organization_election());
    }

    #[test]
    fn type_of_work_for_interstate_and_special_districts() {
        assert!(with_type(Some(OrganizationType::Interstate)).show_type_of_work());
        assert!(with_type(Some(OrganizationType::SpecialDistrict)).show_type_of_work());
        assert!(!with_type(Some(OrganizationType::County)).show_type_of_work());
    }

    #[test]
    fn is_federal_is_unknown_without_a_type() {
        assert_eq!(with_type(None).is_federal(), None);
        assert_eq!(with_type(Some(OrganizationType::Tribal)).is_federal(), Some(false));
        assert!(with_type(Some(OrganizationType::Tribal)).show_tribal_government());
    }

    #[test]
    fn organization_type_round_trips_through_text() {
        for t in [OrganizationType::StateOrTerritory, OrganizationType::SpecialDistrict] {
            assert_eq!(t.to_string().parse::<OrganizationType>().unwrap(), t);
        }
    }
}
