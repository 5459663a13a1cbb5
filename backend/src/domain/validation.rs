//! Field validation for contact candidates.
//!
//! Validation is a pure function of the candidate and the contacts already
//! stored. The result lives beside the entity rather than inside it, so a
//! rejected candidate is returned to the caller untouched together with a
//! [`ValidationErrors`] map for redisplay.

use std::collections::BTreeMap;
use std::fmt;

use super::contact::Contact;

/// Minimum length of first and last names, counted after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Fewest digits an optional phone number may carry.
pub const PHONE_MIN_DIGITS: usize = 10;
/// Most digits an optional phone number may carry.
pub const PHONE_MAX_DIGITS: usize = 15;

/// How much of the rule set applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Names, email format, uniqueness and phone length are all checked.
    #[default]
    Strict,
    /// Only the email presence and uniqueness checks apply.
    Lenient,
}

impl Strictness {
    /// Map the `strict_validation` toggle onto a rule set.
    pub const fn from_strict_flag(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Contact fields that carry validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Given name.
    First,
    /// Family name.
    Last,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

impl Field {
    /// Key used by forms and the error map.
    pub const fn key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::First => "First name",
            Self::Last => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is blank.
    #[error("{0} is required")]
    Required(Field),
    /// The field is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Offending field.
        field: Field,
        /// Minimum character count.
        min: usize,
    },
    /// The email address lacks `@` or `.`.
    #[error("Invalid email format")]
    InvalidEmail,
    /// Another contact already uses the email address.
    #[error("Email already exists")]
    EmailTaken,
    /// The phone number has too few digits.
    #[error("Phone number must have at least {min} digits")]
    PhoneTooShort {
        /// Minimum digit count.
        min: usize,
    },
    /// The phone number has too many digits.
    #[error("Phone number cannot exceed {max} digits")]
    PhoneTooLong {
        /// Maximum digit count.
        max: usize,
    },
}

/// Field-to-message mapping produced by [`validate`].
///
/// A candidate is acceptable iff the map is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    /// Whether no rule rejected the candidate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error recorded against `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Human-readable message for `field`, if rejected.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Rejected fields with their errors.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {error}", field.key())?;
            first = false;
        }
        Ok(())
    }
}

/// Check `candidate` against the rule set.
///
/// `existing` is the stored collection; the candidate's own record (same
/// assigned id) is skipped by the uniqueness check so unchanged emails pass.
///
/// # Examples
/// ```
/// use contacts::domain::{Contact, Field, Strictness, validate};
///
/// let candidate = Contact::draft("Ada", "Lovelace", "12345", "ada@example.com");
/// let errors = validate(&candidate, &[], Strictness::Strict);
/// assert_eq!(
///     errors.message(Field::Phone).as_deref(),
///     Some("Phone number must have at least 10 digits"),
/// );
/// ```
pub fn validate(candidate: &Contact, existing: &[Contact], strictness: Strictness) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if strictness == Strictness::Strict {
        check_name(&mut errors, Field::First, &candidate.first);
        check_name(&mut errors, Field::Last, &candidate.last);
    }

    check_email(&mut errors, candidate, existing, strictness);

    if strictness == Strictness::Strict {
        check_phone(&mut errors, &candidate.phone);
    }

    errors
}

fn check_name(errors: &mut ValidationErrors, field: Field, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, FieldError::Required(field));
    } else if trimmed.chars().count() < NAME_MIN_CHARS {
        errors.insert(
            field,
            FieldError::TooShort {
                field,
                min: NAME_MIN_CHARS,
            },
        );
    }
}

/// A malformed address is reported as such even when it is also taken.
fn check_email(
    errors: &mut ValidationErrors,
    candidate: &Contact,
    existing: &[Contact],
    strictness: Strictness,
) {
    let email = candidate.email.as_str();
    if email.trim().is_empty() {
        errors.insert(Field::Email, FieldError::Required(Field::Email));
        return;
    }
    if strictness == Strictness::Strict && !(email.contains('@') && email.contains('.')) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
        return;
    }

    let taken = existing
        .iter()
        .any(|other| other.email == email && !is_same_record(other, candidate));
    if taken {
        errors.insert(Field::Email, FieldError::EmailTaken);
    }
}

fn is_same_record(stored: &Contact, candidate: &Contact) -> bool {
    !candidate.id.is_unassigned() && stored.id == candidate.id
}

fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    if phone.trim().is_empty() {
        return;
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < PHONE_MIN_DIGITS {
        errors.insert(
            Field::Phone,
            FieldError::PhoneTooShort {
                min: PHONE_MIN_DIGITS,
            },
        );
    } else if digits > PHONE_MAX_DIGITS {
        errors.insert(
            Field::Phone,
            FieldError::PhoneTooLong {
                max: PHONE_MAX_DIGITS,
            },
        );
    }
}
