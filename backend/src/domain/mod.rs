//! Domain primitives and ports.
//!
//! Purpose: define the contact entity, its validation rules and the store
//! port consumed by the HTTP adapter. Nothing here knows about actix.
//!
//! Public surface:
//! - Contact / ContactId: address book entry and its identifier.
//! - validate / ValidationErrors: rule evaluation kept apart from the entity.
//! - ContactStore / StoreSettings: the store port and its toggles.
//! - Error / ErrorCode: transport-agnostic failures.

pub mod contact;
pub mod error;
pub mod ports;
pub mod validation;

pub use self::contact::{Contact, ContactId, InvalidContactId};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ports::{ContactNotFound, ContactStore, SaveError, StoreSettings};
pub use self::validation::{Field, FieldError, Strictness, ValidationErrors, validate};

