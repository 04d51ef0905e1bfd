//! Normalized email address.

use crate::RosterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

/// Rejected email text, after normalization.
#[derive(Debug, Error)]
#[error("Invalid email address: '{0}'")]
pub struct EmailError(String);

impl From<EmailError> for RosterError {
    fn from(err: EmailError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// An email in canonical form: trimmed and lower-cased.
///
/// Two addresses that differ only in case or surrounding whitespace are the
/// same `Email`, which is what uniqueness among live records is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalizes `raw` and checks its format.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailError> {
        let canonical = raw.as_ref().trim().to_lowercase();
        if canonical.validate_email() {
            Ok(Self(canonical))
        } else {
            Err(EmailError(canonical))
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

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
