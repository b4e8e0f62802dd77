//! Account entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Email address normalized for comparison.
///
/// Leading and trailing whitespace is removed and the address is lowercased,
/// so two spellings of the same mailbox compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "parent@example.com")]
pub struct EmailAddress(String);

/// Why an email address was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must contain a local part and a domain")]
    Malformed,
}

impl EmailAddress {
    /// Trim, lowercase, and validate an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        match normalized.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(normalized))
            }
            _ => Err(EmailValidationError::Malformed),
        }
    }

    /// Normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A registered account, created on first login and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: UserId,
    pub email: EmailAddress,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a brand new account with a freshly minted identifier.
    pub fn register(
        email: EmailAddress,
        name: impl Into<String>,
        picture: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: UserId::generate(),
            email,
            name: name.into(),
            picture,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Parent@Example.com", "parent@example.com")]
    #[case("  carer@example.org \n", "carer@example.org")]
    fn normalizes_addresses(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("no-at-sign", EmailValidationError::Malformed)]
    #[case("@example.com", EmailValidationError::Malformed)]
    #[case("a@b@c", EmailValidationError::Malformed)]
    fn rejects_invalid_addresses(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn differently_cased_addresses_compare_equal() {
        let a = EmailAddress::new("A@X.IO").expect("valid");
        let b = EmailAddress::new("a@x.io").expect("valid");
        assert_eq!(a, b);
    }
}
