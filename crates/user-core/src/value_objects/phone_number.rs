//! Phone number value object
//!
//! Numbers are kept in a normalized form with formatting characters removed.
//! A number is valid when it has the E.164 shape: `+`, then 8 to 15 digits,
//! the first of which is not zero. Country-specific numbering plans are not
//! checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters dropped during normalization
const FORMATTING_CHARS: [char; 5] = [' ', '-', '.', '(', ')'];

/// Structured phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits after the `+`
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits after the `+` (E.164 limit)
    pub const MAX_DIGITS: usize = 15;

    /// Wrap a raw phone string, removing formatting characters
    ///
    /// No validity check is done here; see [`PhoneNumber::parse`].
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .trim()
            .chars()
            .filter(|c| !FORMATTING_CHARS.contains(c))
            .collect();
        Self(normalized)
    }

    /// Parse and validate a phone number
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberError> {
        let phone = Self::new(raw);
        if phone.is_valid() {
            Ok(phone)
        } else {
            Err(PhoneNumberError::Invalid(raw.to_string()))
        }
    }

    /// Check the E.164 shape
    pub fn is_valid(&self) -> bool {
        let Some(digits) = self.0.strip_prefix('+') else {
            return false;
        };

        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !digits.starts_with('0')
    }

    /// Get the normalized string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when parsing a phone number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneNumberError {
    #[error("invalid phone number: {0}")]
    Invalid(String),
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhoneNumber::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let phone = PhoneNumber::new(" +1 (415) 555-0132 ");
        assert_eq!(phone.as_str(), "+14155550132");
    }

    #[test]
    fn test_valid_numbers() {
        assert!(PhoneNumber::new("+14155550132").is_valid());
        assert!(PhoneNumber::new("+380 44 123 45 67").is_valid());
        assert!(PhoneNumber::new("+44.20.7946.0958").is_valid());
    }

    #[test]
    fn test_invalid_numbers() {
        // missing plus
        assert!(!PhoneNumber::new("14155550132").is_valid());
        // too short
        assert!(!PhoneNumber::new("+1234567").is_valid());
        // too long
        assert!(!PhoneNumber::new("+1234567890123456").is_valid());
        // leading zero
        assert!(!PhoneNumber::new("+0123456789").is_valid());
        // letters
        assert!(!PhoneNumber::new("+1415555CALL").is_valid());
        assert!(!PhoneNumber::new("").is_valid());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "+1 415 555 0132".parse::<PhoneNumber>().unwrap().as_str(),
            "+14155550132"
        );
        assert_eq!(
            PhoneNumber::parse("555-0132"),
            Err(PhoneNumberError::Invalid("555-0132".to_string()))
        );
    }

    #[test]
    fn test_serde_transparent() {
        let phone = PhoneNumber::new("+14155550132");
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+14155550132\"");
        let back: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phone);
    }
}
