//! Opaque identifiers for stored entities.
//!
//! Every identifier is a v4 UUID rendered in its canonical hyphenated form.
//! Parsing rejects anything else so handlers can surface `invalid_request`
//! before touching the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation failures raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} must be a UUID")]
    InvalidUuid { kind: &'static str },
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Field name used in validation messages.
            pub const KIND: &'static str = $kind;

            /// Mint a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an identifier from its textual form.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = raw.as_ref().trim();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::InvalidUuid { kind: $kind })
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }
    };
}

define_entity_id!(
    /// Identifier of an account.
    UserId => "user_id"
);
define_entity_id!(
    /// Identifier of a baby profile.
    BabyId => "baby_id"
);
define_entity_id!(
    /// Identifier of a feeding, sleep, diaper, or growth record.
    RecordId => "record_id"
);
define_entity_id!(
    /// Identifier of a share invite.
    InviteId => "invite_id"
);
define_entity_id!(
    /// Identifier of a reminder.
    ReminderId => "reminder_id"
);
