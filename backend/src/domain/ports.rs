//! Domain ports consumed by inbound adapters.
//!
//! HTTP handlers only see the [`ContactStore`] trait; the in-memory adapter
//! lives under `outbound`.

use pagination::{Page, PageNumber, PageSize};

use super::contact::{Contact, ContactId};
use super::error::Error;
use super::validation::{Strictness, ValidationErrors};

/// Lookup or removal of an identifier the store does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no such contact: {id}")]
pub struct ContactNotFound {
    /// Identifier that was requested.
    pub id: ContactId,
}

impl From<ContactNotFound> for Error {
    fn from(err: ContactNotFound) -> Self {
        Error::not_found(err.to_string())
    }
}

/// Reasons a contact could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// The candidate broke at least one validation rule.
    #[error("contact rejected: {0}")]
    Invalid(ValidationErrors),
    /// An update named a contact the store does not hold.
    #[error(transparent)]
    NotFound(#[from] ContactNotFound),
    /// Every identifier has already been handed out.
    #[error("no contact identifiers left to assign")]
    IdsExhausted,
}

impl From<SaveError> for Error {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::Invalid(errors) => {
                Error::invalid_request(format!("contact rejected: {errors}"))
            }
            SaveError::NotFound(missing) => missing.into(),
            SaveError::IdsExhausted => Error::internal("no contact identifiers left to assign"),
        }
    }
}

/// Behaviour toggles for a contact store.
///
/// The default is the paginated store with the full rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Records per listing page; `None` returns the whole collection.
    pub page_size: Option<PageSize>,
    /// Apply the strict rule set rather than email checks only.
    pub strict_validation: bool,
}

impl StoreSettings {
    /// Rule set implied by [`Self::strict_validation`].
    pub const fn strictness(&self) -> Strictness {
        Strictness::from_strict_flag(self.strict_validation)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: Some(PageSize::DEFAULT),
            strict_validation: true,
        }
    }
}

/// Address book operations used by the HTTP layer.
///
/// Implementations must be safe to share between server workers.
pub trait ContactStore: Send + Sync {
    /// One listing page in insertion order.
    ///
    /// Pages past the end are empty; unpaginated stores ignore `page` and
    /// return everything.
    fn all(&self, page: PageNumber) -> Page<Contact>;

    /// Contacts whose first name, last name or email contain `query`,
    /// ignoring case.
    fn search(&self, query: &str) -> Vec<Contact>;

    /// Contact stored under `id`.
    fn find(&self, id: ContactId) -> Result<Contact, ContactNotFound>;

    /// Validate and store `candidate`, returning the stored record.
    ///
    /// Unassigned identifiers receive a fresh one; otherwise the record with
    /// the same id is replaced, or the candidate is appended. On rejection
    /// the collection is untouched.
    fn save(&self, candidate: &Contact) -> Result<Contact, SaveError>;

    /// Validate and replace the record stored under `candidate.id`.
    ///
    /// Fails with [`SaveError::NotFound`] when no such record exists, so a
    /// contact deleted meanwhile is never brought back.
    fn update(&self, candidate: &Contact) -> Result<Contact, SaveError>;

    /// Remove the contact stored under `id` and return it.
    fn delete(&self, id: ContactId) -> Result<Contact, ContactNotFound>;

    /// Run the rule set without storing anything.
    fn validate(&self, candidate: &Contact) -> ValidationErrors;

    /// Number of stored contacts.
    fn len(&self) -> usize;

    /// Whether the store holds no contacts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
