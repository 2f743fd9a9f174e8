use crate::kernel::EmailTemplate;

/// Sent to an email address with no account yet
pub struct DomainInvitationEmail<'a> {
    pub domain_name: &'a str,
    pub email: &'a str,
}

impl EmailTemplate for DomainInvitationEmail<'_> {
    fn name(&self) -> &'static str {
        "domain_invitation"
    }

    fn subject(&self) -> String {
        "You’ve been added to a .gov domain".to_string()
    }

    fn body(&self) -> String {
        format!(
            "Hi.\n\n\
             {email} has been added as a domain manager for {domain}.\n\n\
             YOU NEED A LOGIN.GOV ACCOUNT\n\
             You’ll need a Login.gov account to manage your .gov domain. Create one with {email} and sign in to get.gov; the domain will be waiting for you.\n\n\
             ----------------------------------------------------------------\n\n\
             The .gov team\n\
             Contact us: <https://get.gov/contact/>\n\
             Visit <https://get.gov>\n",
            email = self.email,
            domain = self.domain_name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_domain_and_invitee() {
        let email = DomainInvitationEmail {
            domain_name: "city.gov",
            email: "invitee@town.com",
        };
        let body = email.body();
        assert!(body.contains("invitee@town.com has been added as a domain manager for city.gov."));
        assert!(!body.contains("\n\n\n"));
    }
}
