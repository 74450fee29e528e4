//! Phone number type.
//!
//! The business phone is stored as the bare ten-digit national number; the
//! `+91` country code is added when links are built.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The number does not have the expected digit count.
    #[error("phone number must have {expected} digits (got {actual})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Digits found after normalization.
        actual: usize,
    },
}

/// A national phone number without country code.
///
/// ## Normalization
///
/// - Spaces, dashes, dots and parentheses are ignored
/// - A leading `+91` or `91` country code is stripped when 12 digits are given
/// - A single leading trunk `0` is stripped when 11 digits are given
///
/// ## Examples
///
/// ```
/// use dryfruto_core::Phone;
///
/// assert_eq!(Phone::parse("98709 90795").unwrap().as_str(), "9870990795");
/// assert_eq!(Phone::parse("+91-9870990795").unwrap().as_str(), "9870990795");
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Digits in a national number.
    pub const DIGITS: usize = 10;

    /// Country calling code prepended to links.
    pub const COUNTRY_CODE: &'static str = "91";

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains letters or other
    /// symbols, or does not normalize to exactly ten digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                '+' if i == 0 => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        let national = match digits.len() {
            12 => digits
                .strip_prefix(Self::COUNTRY_CODE)
                .unwrap_or(digits.as_str()),
            11 => digits.strip_prefix('0').unwrap_or(digits.as_str()),
            _ => digits.as_str(),
        };

        if national.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength {
                expected: Self::DIGITS,
                actual: national.len(),
            });
        }

        Ok(Self(national.to_owned()))
    }

    /// Wrap a constant that is already a bare national number.
    pub(crate) fn from_static(digits: &'static str) -> Self {
        debug_assert_eq!(Self::parse(digits).as_ref().map(Self::as_str), Ok(digits));
        Self(digits.to_owned())
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `tel:` URI with country code (e.g., `tel:+919870990795`).
    #[must_use]
    pub fn call_link(&self) -> String {
        format!("tel:+{}{}", Self::COUNTRY_CODE, self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
