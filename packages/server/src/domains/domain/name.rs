//! Domain name checks shared by the application form and the availability API.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// A domain can be no longer than 253 characters in total
pub const MAX_LENGTH: usize = 253;

lazy_static! {
    // One label of 1-63 alphanumerics or hyphens, not starting or ending
    // with a hyphen, then a 2-6 letter TLD
    static ref DOMAIN_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.[A-Za-z]{2,6}$"
    ).unwrap();
}

/// Why a requested name cannot be used.
///
/// The messages are shown to applicants as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    #[error("Enter the .gov domain you want. Don’t include “www” or “.gov.” For example, if you want www.city.gov, you would enter “city” (without the quotes).")]
    Blank,

    #[error("Enter the .gov domain you want without any periods.")]
    ExtraDots,

    #[error("Enter a domain using only letters, numbers, or hyphens (though we don't recommend using hyphens).")]
    Invalid,

    #[error("That domain isn’t available. Try entering another one. Contact us if you need help coming up with a domain.")]
    Unavailable,
}

/// Could `name` be a domain name?
pub fn string_could_be_domain(name: &str) -> bool {
    name.len() <= MAX_LENGTH && DOMAIN_REGEX.is_match(name)
}

/// Normalize a requested name into its second-level label.
///
/// Lowercases and trims, drops a trailing ".gov", and rejects anything that
/// is still not a single label. Availability is checked separately.
pub fn normalize(raw: &str) -> Result<String, DomainNameError> {
    let domain = raw.trim().to_lowercase();
    if domain.is_empty() {
        return Err(DomainNameError::Blank);
    }

    let label = domain.strip_suffix(".gov").unwrap_or(&domain);
    if label.contains('.') {
        return Err(DomainNameError::ExtraDots);
    }
    if !string_could_be_domain(&format!("{}.gov", label)) {
        return Err(DomainNameError::Invalid);
    }
    Ok(label.to_string())
}

/// Fully qualified .gov name for a requested label or name
pub fn fqdn(label: &str) -> String {
    format!("{}.gov", sld(label))
}

/// Second level domain: `gsa.gov` -> `gsa`.
///
/// Returns the input unchanged when there is no TLD.
pub fn sld(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

/// Top level domain: `gsa.gov` -> `gov`. Empty when there is none.
pub fn tld(domain: &str) -> &str {
    match domain.rsplit_once('.') {
        Some((_, tld)) => tld,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert!(string_could_be_domain("city.gov"));
        assert!(string_could_be_domain("a.gov"));
        assert!(string_could_be_domain("my-city.gov"));
        assert!(string_could_be_domain("City1.GOV"));
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(!string_could_be_domain("-city.gov"));
        assert!(!string_could_be_domain("city-.gov"));
        assert!(!string_could_be_domain("city"));
        assert!(!string_could_be_domain("www.city.gov"));
        assert!(!string_could_be_domain("city.g"));
        assert!(!string_could_be_domain("city.governm"));
        assert!(!string_could_be_domain("ci ty.gov"));
        assert!(!string_could_be_domain(&format!("{}.gov", "a".repeat(64))));
        assert!(string_could_be_domain(&format!("{}.gov", "a".repeat(63))));
    }

    #[test]
    fn normalizes_requested_names() {
        assert_eq!(normalize(" City.GOV ").unwrap(), "city");
        assert_eq!(normalize("city").unwrap(), "city");
    }

    #[test]
    fn classifies_bad_requests() {
        assert_eq!(normalize("   "), Err(DomainNameError::Blank));
        assert_eq!(normalize("www.city.gov"), Err(DomainNameError::ExtraDots));
        assert_eq!(normalize("city.com"), Err(DomainNameError::ExtraDots));
        assert_eq!(normalize("ci_ty"), Err(DomainNameError::Invalid));
        assert_eq!(normalize("-city"), Err(DomainNameError::Invalid));
    }

    #[test]
    fn splits_sld_and_tld() {
        assert_eq!(sld("gsa.gov"), "gsa");
        assert_eq!(sld("gsa"), "gsa");
        assert_eq!(tld("gsa.gov"), "gov");
        assert_eq!(tld("gsa"), "");
        assert_eq!(fqdn("city"), "city.gov");
        assert_eq!(fqdn("city.gov"), "city.gov");
    }
}
