//! Field checks run before a contact is saved or sent to the registry.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::ContactFields;

/// Shortest auth info the registry accepts
pub const MIN_PW_LENGTH: usize = 16;

lazy_static! {
    // +CC.NUMBER, e.g. +1.8882820870
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+[0-9]{1,3}\.[0-9]{1,14}$").unwrap();
}

/// Names of the fields that failed, in form order
pub fn validate_fields(fields: &ContactFields) -> Result<(), Vec<String>> {
    let mut invalid = Vec::new();

    let required = [
        ("name", &fields.name),
        ("street1", &fields.street1),
        ("city", &fields.city),
        ("sp", &fields.sp),
        ("pc", &fields.pc),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            invalid.push(field.to_string());
        }
    }

    if fields.cc.len() != 2 || !fields.cc.chars().all(|c| c.is_ascii_alphabetic()) {
        invalid.push("cc".to_string());
    }
    if !looks_like_email(&fields.email) {
        invalid.push("email".to_string());
    }
    if !PHONE_REGEX.is_match(&fields.voice) {
        invalid.push("voice".to_string());
    }
    if let Some(fax) = &fields.fax {
        if !PHONE_REGEX.is_match(fax) {
            invalid.push("fax".to_string());
        }
    }
    if fields.pw.chars().count() < MIN_PW_LENGTH {
        invalid.push("pw".to_string());
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(invalid)
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
