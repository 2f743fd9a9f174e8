//! Registry contact identifiers.

use chrono::{Datelike, Utc, Weekday};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of every registry contact id
pub const REGISTRY_ID_LENGTH: usize = 16;

const RANDOM_PART: usize = REGISTRY_ID_LENGTH - 2;

/// A fresh registry id: two letters of today's weekday followed by 14 random
/// alphanumerics, e.g. `MoQ3xk8ZrT0bLwPa`.
///
/// Not a secret; uniqueness is enforced by the database.
pub fn generate_registry_id() -> String {
    let prefix = weekday_prefix(Utc::now().weekday());
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_PART)
        .map(char::from)
        .collect();
    format!("{}{}", prefix, suffix)
}

fn weekday_prefix(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_sixteen_alphanumerics() {
        let id = generate_registry_id();
        assert_eq!(id.len(), REGISTRY_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn ten_thousand_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_registry_id()).collect();
        assert_eq!(ids.len(), 10_000);
        assert!(ids.iter().all(|id| id.len() == REGISTRY_ID_LENGTH));
    }

    #[test]
    fn prefix_names_the_weekday() {
        assert_eq!(weekday_prefix(Weekday::Mon), "Mo");
        assert_eq!(weekday_prefix(Weekday::Thu), "Th");
        assert_eq!(weekday_prefix(Weekday::Sun), "Su");

        let id = generate_registry_id();
        let prefixes = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
        assert!(prefixes.contains(&&id[..2]));
    }
}
