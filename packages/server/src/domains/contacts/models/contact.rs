use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::{ContactId, UserId};

/// A person named on an application: authorizing official, submitter, or
/// another employee. Not published to the registry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: Option<UserId>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct CreateContact<'a> {
    pub user_id: Option<UserId>,
    pub first_name: Option<&'a str>,
    pub middle_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub title: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl Contact {
    /// Present name parts joined by spaces, or "Unknown"
    pub fn formatted_name(&self) -> String {
        let parts: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Email with surrounding whitespace removed, if there is a usable one
    pub fn email_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Contact {
    pub async fn find_by_id<'e>(id: ContactId, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(Into::into)
    }

    pub async fn create<'e>(input: CreateContact<'_>, db: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO contacts (id, user_id, first_name, middle_name, last_name, title, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ContactId::new())
        .bind(input.user_id)
        .bind(input.first_name)
        .bind(input.middle_name)
        .bind(input.last_name)
        .bind(input.title)
        .bind(input.email)
        .bind(input.phone)
        .fetch_one(db)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: Option<&str>, middle: Option<&str>, last: Option<&str>) -> Contact {
        Contact {
            id: ContactId::new(),
            user_id: None,
            first_name: first.map(String::from),
            middle_name: middle.map(String::from),
            last_name: last.map(String::from),
            title: None,
            email: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn formatted_name_joins_present_parts() {
        assert_eq!(
            contact(Some("Testy"), Some("J."), Some("Tester")).formatted_name(),
            "Testy J. Tester"
        );
        assert_eq!(contact(Some("Testy"), None, Some("Tester")).formatted_name(), "Testy Tester");
        assert_eq!(contact(None, Some(" "), Some("Tester")).formatted_name(), "Tester");
    }

    #[test]
    fn formatted_name_falls_back_to_unknown() {
        assert_eq!(contact(None, None, None).formatted_name(), "Unknown");
    }

    #[test]
    fn blank_email_is_not_an_address() {
        let mut c = contact(Some("Testy"), None, None);
        c.email = Some("  ".to_string());
        assert_eq!(c.email_address(), None);
        c.email = Some(" testy@town.com".to_string());
        assert_eq!(c.email_address(), Some("testy@town.com"));
    }
}
