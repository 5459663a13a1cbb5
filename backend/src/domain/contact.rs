//! Contact data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a path segment is not a valid contact identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid contact id: {value}")]
pub struct InvalidContactId {
    value: String,
}

/// Stable contact identifier.
///
/// `0` marks a contact that has not been stored yet; the store assigns a
/// fresh identifier on first save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    /// Identifier carried by contacts that have never been saved.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether the store still has to assign an identifier.
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }

    /// Identifier following this one, `None` once `u64::MAX` is reached.
    pub const fn successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = InvalidContactId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self).map_err(|_| InvalidContactId {
            value: s.to_owned(),
        })
    }
}

/// A person in the address book.
///
/// The serialised field names match the seed file format (`ID`, `First`,
/// `Last`, `Phone`, `Email`); lower-case spellings are accepted on read.
/// Validation results are never stored here, see
/// [`ValidationErrors`](crate::domain::ValidationErrors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier, [`ContactId::UNASSIGNED`] for new contacts.
    #[serde(rename = "ID", alias = "id", default)]
    pub id: ContactId,
    /// Given name.
    #[serde(rename = "First", alias = "first", default)]
    pub first: String,
    /// Family name.
    #[serde(rename = "Last", alias = "last", default)]
    pub last: String,
    /// Free-form phone number; may be empty.
    #[serde(rename = "Phone", alias = "phone", default)]
    pub phone: String,
    /// Email address, unique across the address book.
    #[serde(rename = "Email", alias = "email", default)]
    pub email: String,
}

impl Contact {
    /// Build an unsaved contact from its fields.
    pub fn draft(
        first: impl Into<String>,
        last: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: ContactId::UNASSIGNED,
            first: first.into(),
            last: last.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Return the same contact carrying `id`.
    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = id;
        self
    }

    /// "First Last", trimmed when either part is blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first.trim(), self.last.trim())
            .trim()
            .to_owned()
    }

    /// Case-insensitive substring match on first name, last name or email.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.first, &self.last, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
