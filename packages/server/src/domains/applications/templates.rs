//! Plain-text emails sent during the application lifecycle.
//!
//! Sections are joined with a single blank line, so an omitted optional
//! section never leaves a double gap behind.

use crate::domains::applications::models::ApplicationDetails;
use crate::domains::contacts::Contact;
use crate::kernel::EmailTemplate;

const RULE: &str = "----------------------------------------------------------------";

const NEXT_STEPS: &str = "\
NEXT STEPS

- We’re reviewing your request. This usually takes 20 business days.

- You can check the status of your request at any time.
  <https://registrar.get.gov/>

- We’ll email you with questions or when we complete our review.

NEED TO MAKE CHANGES?

If you need to change your request you have to ask us to withdraw it. Once it’s withdrawn, you can submit a new request.

THANK YOU

.Gov helps the public identify official, trusted information. Thank you for requesting a .gov domain!";

const SIGNATURE: &str = "\
The .gov team
Contact us: <https://get.gov/contact/>
Visit <https://get.gov>";

/// Confirmation sent to the submitter when an application is submitted
pub struct SubmissionConfirmation<'a> {
    pub details: &'a ApplicationDetails,
}

impl<'a> SubmissionConfirmation<'a> {
    pub fn new(details: &'a ApplicationDetails) -> Self {
        Self { details }
    }

    fn greeting(&self) -> String {
        let name = self
            .details
            .submitter
            .as_ref()
            .and_then(|s| present(&s.first_name))
            .unwrap_or("there");
        format!(
            "Hi {}.\n\nWe received your .gov domain request.\n\nSUMMARY OF YOUR DOMAIN REQUEST",
            name
        )
    }

    fn organization_type(&self) -> String {
        let label = self
            .details
            .application
            .organization_type()
            .map(|t| t.label())
            .unwrap_or("Not provided");
        format!("Type of organization:\n{}", label)
    }

    fn organization_address(&self) -> String {
        let app = &self.details.application;
        let mut lines = vec!["Organization name and mailing address:".to_string()];
        lines.extend(present(&app.organization_name).map(String::from));
        lines.extend(present(&app.address_line1).map(String::from));
        lines.extend(present(&app.address_line2).map(String::from));

        let locality: Vec<&str> = [present(&app.city), present(&app.state_territory)]
            .into_iter()
            .flatten()
            .collect();
        if !locality.is_empty() {
            lines.push(locality.join(", "));
        }
        lines.extend(present(&app.zipcode).map(String::from));
        lines.extend(present(&app.urbanization).map(String::from));
        lines.join("\n")
    }

    fn type_of_work(&self) -> Option<String> {
        present(&self.details.application.type_of_work).map(|work| format!("Type of work:\n{}", work))
    }

    fn authorizing_official(&self) -> String {
        section_with_contact("Authorizing official:", self.details.authorizing_official.as_ref())
    }

    fn current_websites(&self) -> Option<String> {
        if self.details.current_websites.is_empty() {
            return None;
        }
        let mut lines = vec!["Current website for your organization:".to_string()];
        lines.extend(self.details.current_websites.iter().map(|w| w.website.clone()));
        Some(lines.join("\n"))
    }

    fn requested_domains(&self) -> String {
        let mut lines = vec![".gov domain:".to_string()];
        lines.extend(self.details.requested_domain.as_ref().map(|d| d.name.clone()));
        lines.extend(self.details.alternative_domains.iter().map(|w| w.website.clone()));
        lines.join("\n")
    }

    fn purpose(&self) -> String {
        format!(
            "Purpose of your domain:\n{}",
            present(&self.details.application.purpose).unwrap_or_default()
        )
    }

    fn submitter(&self) -> String {
        section_with_contact("Your contact information:", self.details.submitter.as_ref())
    }

    fn other_contacts(&self) -> Option<String> {
        if self.details.other_contacts.is_empty() {
            return None;
        }
        let blocks: Vec<String> = self.details.other_contacts.iter().map(contact_block).collect();
        Some(format!(
            "Other employees from your organization:\n{}",
            blocks.join("\n\n")
        ))
    }

    fn anything_else(&self) -> Option<String> {
        present(&self.details.application.anything_else)
            .map(|text| format!("Anything else we should know?\n{}", text))
    }
}

impl EmailTemplate for SubmissionConfirmation<'_> {
    fn name(&self) -> &'static str {
        "submission_confirmation"
    }

    fn subject(&self) -> String {
        "Thank you for applying for a .gov domain".to_string()
    }

    fn body(&self) -> String {
        let sections: Vec<String> = [
            Some(self.greeting()),
            Some(self.organization_type()),
            Some(self.organization_address()),
            self.type_of_work(),
            Some(self.authorizing_official()),
            self.current_websites(),
            Some(self.requested_domains()),
            Some(self.purpose()),
            Some(self.submitter()),
            self.other_contacts(),
            self.anything_else(),
            Some(RULE.to_string()),
            Some(NEXT_STEPS.to_string()),
            Some(SIGNATURE.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        format!("{}\n", sections.join("\n\n"))
    }
}

/// Name, title, email, phone; absent lines are left out
fn contact_block(contact: &Contact) -> String {
    let mut lines = vec![contact.formatted_name()];
    lines.extend(present(&contact.title).map(String::from));
    lines.extend(contact.email_address().map(String::from));
    lines.extend(present(&contact.phone).map(String::from));
    lines.join("\n")
}

fn section_with_contact(heading: &str, contact: Option<&Contact>) -> String {
    match contact {
        Some(contact) => format!("{}\n{}", heading, contact_block(contact)),
        None => heading.to_string(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
