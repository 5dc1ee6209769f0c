//! Contact details attached to an order request.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating contact details.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The contact name is empty.
    #[error("name cannot be empty")]
    EmptyName,
    /// The email address is empty.
    #[error("email cannot be empty")]
    EmptyEmail,
    /// The email address is too long.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The email address has no usable `local@domain` structure.
    #[error("email must look like name@domain")]
    MalformedEmail,
    /// The phone number does not contain enough digits.
    #[error("phone must contain at least {min} digits")]
    PhoneTooShort {
        /// Minimum number of digits.
        min: usize,
    },
}

/// An email address with a non-empty local part and domain.
///
/// ```
/// use metriks_core::Email;
///
/// assert!(Email::parse("buyer@example.com").is_ok());
/// assert!(Email::parse("buyer@").is_err());
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from user input. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 254 characters, or
    /// lacks a local part or domain around the `@`.
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ContactError::EmptyEmail);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(ContactError::EmailTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(s.to_owned()))
            }
            _ => Err(ContactError::MalformedEmail),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number as typed by the buyer, kept verbatim for the sales team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum digit count (local numbers without country code).
    pub const MIN_DIGITS: usize = 10;

    /// Parse a phone number. Formatting characters are allowed; only the
    /// digit count is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::PhoneTooShort`] if fewer than 10 digits are present.
    pub fn parse(s: &str) -> Result<Self, ContactError> {
        let digits = s.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(ContactError::PhoneTooShort {
                min: Self::MIN_DIGITS,
            });
        }
        Ok(Self(s.trim().to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is asking for the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
}

impl ContactDetails {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ContactError`].
    pub fn parse(name: &str, email: &str, phone: &str) -> Result<Self, ContactError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            email: Email::parse(email)?,
            phone: Phone::parse(phone)?,
        })
    }
}
