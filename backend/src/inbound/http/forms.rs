//! Form and query payloads accepted by the contact pages.

use serde::Deserialize;

use crate::domain::{Contact, ContactId};

/// Fields submitted by the new and edit forms.
///
/// Missing fields deserialise as empty strings so validation, not
/// extraction, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ContactForm {
    /// Candidate record for `id`.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first: self.first_name,
            last: self.last_name,
            phone: self.phone,
            email: self.email,
        }
    }
}

/// `GET /contacts` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based page number; anything unparseable means page 1.
    pub page: Option<String>,
    /// Search text; presence switches the listing to search mode.
    pub q: Option<String>,
}

/// `GET /contacts/{id}/email` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn form_maps_onto_contact_fields() {
        let form = ContactForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: "555-123-4567".into(),
            email: "ada@example.com".into(),
        };
        let contact = form.into_contact(ContactId::new(7));
        assert_eq!(
            contact,
            Contact::draft("Ada", "Lovelace", "555-123-4567", "ada@example.com")
                .with_id(ContactId::new(7))
        );
    }

    #[rstest]
    fn missing_form_fields_default_to_empty() {
        let form: ContactForm =
            serde_json::from_str(r#"{"first_name":"Ada"}"#).expect("partial form");
        assert_eq!(form.first_name, "Ada");
        assert!(form.email.is_empty());
    }
}
