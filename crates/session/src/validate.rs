//! Pure form-field predicates.
//!
//! These mirror what the checkout and contact forms check before
//! anything is persisted. Where a typed equivalent exists in
//! `sipayi-core` ([`Email`](sipayi_core::Email),
//! [`Phone`](sipayi_core::Phone)) the predicate delegates to its
//! parser, so the form check and the domain type can never disagree.

use sipayi_core::{Email, Phone};

/// Permissive email format check: single `@`, no whitespace, dotted
/// domain.
#[must_use]
pub fn validate_email(value: &str) -> bool {
    Email::parse(value).is_ok()
}

/// Indian mobile number check: optional `+91`, 10 digits starting 6-9,
/// separators ignored.
#[must_use]
pub fn validate_phone(value: &str) -> bool {
    Phone::parse(value).is_ok()
}

/// True if the trimmed value is non-empty.
#[must_use]
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True if the trimmed character length is within `min..=max`.
#[must_use]
pub fn validate_length(value: &str, min: usize, max: usize) -> bool {
    let length = value.trim().chars().count();
    length >= min && length <= max
}

/// True if the value parses as a number within `min..=max`.
///
/// Non-numeric input (including NaN spellings) is rejected.
#[must_use]
pub fn validate_range(value: &str, min: f64, max: f64) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|num| !num.is_nan() && num >= min && num <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("user.name+tag@example.com"));
        assert!(!validate_email("bad@"));
        assert!(!validate_email("no-at"));
        assert!(!validate_email("a b@c.com"));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210"));
        assert!(validate_phone("+919876543210"));
        assert!(validate_phone("+91 98765-43210"));
        assert!(!validate_phone("5876543210"));
        assert!(!validate_phone("12345"));
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("x"));
        assert!(validate_required("  x  "));
        assert!(!validate_required(""));
        assert!(!validate_required("   "));
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_length("hello", 2, 10));
        assert!(validate_length("  hi  ", 2, 2));
        assert!(!validate_length("h", 2, 10));
        assert!(!validate_length("toolongvalue", 2, 5));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("5", 1.0, 10.0));
        assert!(validate_range("2.5", 1.0, 10.0));
        assert!(validate_range("1", 1.0, 10.0));
        assert!(validate_range("10", 1.0, 10.0));
        assert!(!validate_range("0.5", 1.0, 10.0));
        assert!(!validate_range("eleven", 1.0, 10.0));
        assert!(!validate_range("NaN", 1.0, 10.0));
    }
}
