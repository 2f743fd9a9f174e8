//! Placeholder WHOIS data published until a domain manager enters their own.

use lazy_static::lazy_static;

use super::models::{ContactFields, ContactType};

struct Template {
    contact_type: ContactType,
    name: &'static str,
    street1: &'static str,
    street2: Option<&'static str>,
    pc: &'static str,
}

const ORG: &str = "Cybersecurity and Infrastructure Security Agency";
const CITY: &str = "Arlington";
const SP: &str = "VA";
const CC: &str = "US";
const EMAIL: &str = "dotgov@cisa.dhs.gov";
const VOICE: &str = "+1.8882820870";
const PW: &str = "thisisnotapassword";

const TEMPLATES: [Template; 4] = [
    Template {
        contact_type: ContactType::Registrant,
        name: "CSD/CB – Attn: Cameron Dixon",
        street1: "CISA – NGR STOP 0645",
        street2: Some("1110 N. Glebe Rd."),
        pc: "20598-0645",
    },
    Template {
        contact_type: ContactType::Administrative,
        name: "Program Manager",
        street1: "4200 Wilson Blvd.",
        street2: None,
        pc: "22201",
    },
    Template {
        contact_type: ContactType::Technical,
        name: "Registry Customer Service",
        street1: "4200 Wilson Blvd.",
        street2: None,
        pc: "22201",
    },
    Template {
        contact_type: ContactType::Security,
        name: "Registry Customer Service",
        street1: "4200 Wilson Blvd.",
        street2: None,
        pc: "22201",
    },
];

/// Default contact fields per role
pub struct DefaultContacts {
    by_type: [ContactFields; 4],
}

lazy_static! {
    static ref DEFAULTS: DefaultContacts = DefaultContacts::load();
}

impl DefaultContacts {
    /// The table, built on first use
    pub fn global() -> &'static DefaultContacts {
        &DEFAULTS
    }

    fn load() -> Self {
        debug_assert!(TEMPLATES
            .iter()
            .zip(ContactType::ALL)
            .all(|(t, role)| t.contact_type == role));

        Self {
            by_type: TEMPLATES.map(|t| ContactFields {
                name: t.name.to_string(),
                org: Some(ORG.to_string()),
                street1: t.street1.to_string(),
                street2: t.street2.map(str::to_string),
                street3: None,
                city: CITY.to_string(),
                sp: SP.to_string(),
                pc: t.pc.to_string(),
                cc: CC.to_string(),
                email: EMAIL.to_string(),
                voice: VOICE.to_string(),
                fax: None,
                pw: PW.to_string(),
            }),
        }
    }

    pub fn get(&self, contact_type: ContactType) -> &ContactFields {
        &self.by_type[contact_type.position()]
    }
}
