//! Field validators
//!
//! Each validator returns the inline error message, or `None` when the value
//! is acceptable.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound of the day criteria (the server stores seconds in an `i32`)
pub const MAX_CRITERIA_DAYS: u32 = 24_855;

/// Maximum length of names and ids
pub const MAX_NAME_LENGTH: usize = 255;

pub const REQUIRED: &str = "This field is required";

static NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-]{1}[a-zA-Z0-9_\-\.]*$").ok());

pub fn required(value: &str) -> Option<String> {
    value.trim().is_empty().then(|| REQUIRED.to_string())
}

/// Names and ids: required, length limited, restricted character set
pub fn name(value: &str) -> Option<String> {
    if let Some(error) = required(value) {
        return Some(error);
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Some(format!("This field has a maximum length of {MAX_NAME_LENGTH}"));
    }
    let valid = NAME_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value));
    (!valid).then(|| {
        "Only letters, digits, underscores(_), hyphens(-), and dots(.) are allowed and may not start with underscore or dot."
            .to_string()
    })
}

/// Required integer within `min..=max`
pub fn integer_in_range(value: &str, min: u32, max: u32) -> Option<String> {
    if let Some(error) = required(value) {
        return Some(error);
    }
    match parse_integer(value) {
        Some(n) if (min..=max).contains(&n) => None,
        Some(_) | None => Some(format!("Enter a whole number between {min} and {max}")),
    }
}

/// Required integer of at least `min`
pub fn integer_at_least(value: &str, min: u32) -> Option<String> {
    if let Some(error) = required(value) {
        return Some(error);
    }
    match parse_integer(value) {
        Some(n) if n >= min => None,
        Some(_) | None => Some(format!("Enter a whole number of at least {min}")),
    }
}

/// Parse a trimmed non-negative integer
pub fn parse_integer(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(name("maven-weekly.v2").is_none());
        assert!(name("-leading-hyphen").is_none());
        assert_eq!(name(""), Some(REQUIRED.to_string()));
        assert!(name("_private").is_some());
        assert!(name(".hidden").is_some());
        assert!(name("with space").is_some());
        assert!(name(&"a".repeat(256)).is_some());
        assert!(name(&"a".repeat(255)).is_none());
    }

    #[test]
    fn day_range() {
        assert!(integer_in_range("1", 1, MAX_CRITERIA_DAYS).is_none());
        assert!(integer_in_range("24855", 1, MAX_CRITERIA_DAYS).is_none());
        assert!(integer_in_range("0", 1, MAX_CRITERIA_DAYS).is_some());
        assert!(integer_in_range("24856", 1, MAX_CRITERIA_DAYS).is_some());
        assert!(integer_in_range("1.5", 1, MAX_CRITERIA_DAYS).is_some());
        assert!(integer_in_range("-3", 1, MAX_CRITERIA_DAYS).is_some());
        assert_eq!(integer_in_range(" ", 1, 10), Some(REQUIRED.to_string()));
    }

    #[test]
    fn minimum() {
        assert!(integer_at_least("1", 1).is_none());
        assert!(integer_at_least("0", 1).is_some());
        assert!(integer_at_least("many", 1).is_some());
    }
}
