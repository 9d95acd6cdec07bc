//! Indian mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty after stripping separators.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character other than digits, separators,
    /// or a leading +.
    #[error("phone number contains an invalid character")]
    InvalidCharacter,
    /// The number does not have exactly 10 digits after the optional
    /// country code.
    #[error("phone number must have exactly 10 digits")]
    WrongLength,
    /// The leading digit is outside the 6-9 mobile range.
    #[error("mobile numbers must start with a digit from 6 to 9")]
    BadLeadingDigit,
}

/// An Indian mobile phone number.
///
/// Accepts a bare 10-digit number or one prefixed with the `+91`
/// country calling code. Spaces, hyphens, and parentheses are stripped
/// before validation. The first subscriber digit must be 6-9, which is
/// the mobile allocation convention.
///
/// The normalized 10-digit form is stored; whether the `+91` prefix was
/// present is remembered separately.
///
/// ## Examples
///
/// ```
/// use sipayi_core::Phone;
///
/// assert!(Phone::parse("9876543210").is_ok());
/// assert!(Phone::parse("+91 98765 43210").is_ok());
/// assert!(Phone::parse("(987) 654-3210").is_ok());
///
/// assert!(Phone::parse("5876543210").is_err()); // leading digit < 6
/// assert!(Phone::parse("98765").is_err());      // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Phone {
    digits: String,
    has_country_code: bool,
}

impl Phone {
    /// Country calling code accepted as an optional prefix.
    pub const COUNTRY_CODE: &'static str = "+91";

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if, after stripping spaces/hyphens/parentheses,
    /// the input is not 10 digits (optionally preceded by `+91`) with a
    /// leading digit in 6-9.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let cleaned: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if cleaned.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (digits, has_country_code) = match cleaned.strip_prefix(Self::COUNTRY_CODE) {
            Some(rest) => (rest, true),
            None => (cleaned.as_str(), false),
        };

        if digits.chars().any(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter);
        }

        if digits.len() != 10 {
            return Err(PhoneError::WrongLength);
        }

        if !matches!(digits.chars().next(), Some('6'..='9')) {
            return Err(PhoneError::BadLeadingDigit);
        }

        Ok(Self {
            digits: digits.to_owned(),
            has_country_code,
        })
    }

    /// Returns the normalized 10-digit subscriber number.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns true if the input carried the `+91` country code.
    #[must_use]
    pub const fn has_country_code(&self) -> bool {
        self.has_country_code
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_country_code {
            write!(f, "{}{}", Self::COUNTRY_CODE, self.digits)
        } else {
            write!(f, "{}", self.digits)
        }
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_ten_digits() {
        let phone = Phone::parse("9876543210").unwrap();
        assert_eq!(phone.digits(), "9876543210");
        assert!(!phone.has_country_code());
    }

    #[test]
    fn test_parse_with_country_code() {
        let phone = Phone::parse("+919876543210").unwrap();
        assert_eq!(phone.digits(), "9876543210");
        assert!(phone.has_country_code());
    }

    #[test]
    fn test_parse_strips_separators() {
        assert!(Phone::parse("+91 98765 43210").is_ok());
        assert!(Phone::parse("(987) 654-3210").is_ok());
        assert!(Phone::parse("98765-43210").is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_leading_digit() {
        assert!(matches!(
            Phone::parse("5876543210"),
            Err(PhoneError::BadLeadingDigit)
        ));
        assert!(matches!(
            Phone::parse("0876543210"),
            Err(PhoneError::BadLeadingDigit)
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(Phone::parse("98765"), Err(PhoneError::WrongLength)));
        assert!(matches!(
            Phone::parse("98765432101"),
            Err(PhoneError::WrongLength)
        ));
        assert!(matches!(
            Phone::parse("+91987654321"),
            Err(PhoneError::WrongLength)
        ));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(matches!(
            Phone::parse("98765abcde"),
            Err(PhoneError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse(" - "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_display_keeps_country_code() {
        let phone = Phone::parse("+91 98765 43210").unwrap();
        assert_eq!(phone.to_string(), "+919876543210");

        let bare = Phone::parse("9876543210").unwrap();
        assert_eq!(bare.to_string(), "9876543210");
    }
}
