//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!` and `push_str`. Every value that came
//! from a user or from the contacts file goes through [`escape`] first.

use actix_web::http::StatusCode;
use pagination::Page;

use crate::domain::{Contact, ContactId, Field, ValidationErrors};

/// Escape HTML special characters.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Contacts</title>\n</head>\n<body>\n<main>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// What the index page lists.
#[derive(Debug)]
pub enum Listing {
    /// Search results for `query`, unpaginated.
    Search {
        /// Text the user searched for.
        query: String,
        /// Matching contacts.
        results: Vec<Contact>,
    },
    /// One page of the full collection.
    Page(Page<Contact>),
}

impl Listing {
    fn contacts(&self) -> &[Contact] {
        match self {
            Self::Search { results, .. } => results,
            Self::Page(page) => page.items(),
        }
    }

    fn query(&self) -> &str {
        match self {
            Self::Search { query, .. } => query,
            Self::Page(_) => "",
        }
    }
}

/// `GET /contacts`: flash messages, search box, contact table and paging.
pub fn index(listing: &Listing, messages: &[String], total: usize) -> String {
    let mut html = String::new();

    for message in messages {
        html.push_str(&format!("<p class=\"flash\">{}</p>\n", escape(message)));
    }

    html.push_str(&format!(
        "<form action=\"/contacts\" method=\"get\" class=\"search\">\n\
         <label for=\"search\">Search Term</label>\n\
         <input id=\"search\" type=\"search\" name=\"q\" value=\"{}\">\n\
         <input type=\"submit\" value=\"Search\">\n</form>\n",
        escape(listing.query()),
    ));

    html.push_str(
        "<table>\n<thead>\n<tr><th>First</th><th>Last</th><th>Phone</th><th>Email</th><th></th></tr>\n\
         </thead>\n<tbody>\n",
    );
    for contact in listing.contacts() {
        html.push_str(&format!(
            "<tr><td>{first}</td><td>{last}</td><td>{phone}</td><td>{email}</td>\
             <td><a href=\"/contacts/{id}/edit\">Edit</a> <a href=\"/contacts/{id}\">View</a></td></tr>\n",
            first = escape(&contact.first),
            last = escape(&contact.last),
            phone = escape(&contact.phone),
            email = escape(&contact.email),
            id = contact.id,
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    if listing.contacts().is_empty() {
        html.push_str("<p class=\"empty\">No contacts found.</p>\n");
    }

    if let Listing::Page(page) = listing {
        html.push_str("<nav class=\"pagination\">\n");
        if let Some(previous) = page.number().previous() {
            html.push_str(&format!(
                "<a href=\"/contacts?page={previous}\" rel=\"prev\">Previous</a>\n"
            ));
        }
        if page.has_next() {
            html.push_str(&format!(
                "<a href=\"/contacts?page={}\" rel=\"next\">Next</a>\n",
                page.number().next()
            ));
        }
        html.push_str("</nav>\n");
    }

    html.push_str(&format!(
        "<p><a href=\"/contacts/new\">Add Contact</a> <span class=\"count\">({total} total contacts)</span></p>\n"
    ));

    layout("Contacts", &html)
}

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// `POST /contacts/new`.
    New,
    /// `POST /contacts/{id}/edit`, with a delete button.
    Edit(ContactId),
}

impl FormMode {
    fn action(self) -> String {
        match self {
            Self::New => "/contacts/new".to_owned(),
            Self::Edit(id) => format!("/contacts/{id}/edit"),
        }
    }
}

fn field_row(field: Field, input_type: &str, name: &str, value: &str, errors: &ValidationErrors) -> String {
    let error = errors
        .message(field)
        .map(|message| format!("<span class=\"error\">{}</span>", escape(&message)))
        .unwrap_or_default();
    format!(
        "<p>\n<label for=\"{name}\">{label}</label>\n\
         <input name=\"{name}\" id=\"{name}\" type=\"{input_type}\" placeholder=\"{label}\" value=\"{value}\">\n\
         {error}\n</p>\n",
        label = field,
        value = escape(value),
    )
}

/// New or edit form, prefilled with `contact` and annotated with `errors`.
pub fn contact_form(mode: FormMode, contact: &Contact, errors: &ValidationErrors) -> String {
    let legend = match mode {
        FormMode::New => "Contact Values",
        FormMode::Edit(_) => "Edit Contact",
    };

    let mut html = format!(
        "<form action=\"{action}\" method=\"post\">\n<fieldset>\n<legend>{legend}</legend>\n",
        action = mode.action(),
    );
    html.push_str(&field_row(Field::Email, "email", "email", &contact.email, errors));
    html.push_str(&field_row(Field::First, "text", "first_name", &contact.first, errors));
    html.push_str(&field_row(Field::Last, "text", "last_name", &contact.last, errors));
    html.push_str(&field_row(Field::Phone, "text", "phone", &contact.phone, errors));
    html.push_str("<button>Save</button>\n</fieldset>\n</form>\n");

    if let FormMode::Edit(id) = mode {
        html.push_str(&format!(
            "<form action=\"/contacts/{id}/delete\" method=\"post\">\n\
             <button>Delete Contact</button>\n</form>\n"
        ));
    }
    html.push_str("<p><a href=\"/contacts\">Back</a></p>\n");

    let title = match mode {
        FormMode::New => "New Contact".to_owned(),
        FormMode::Edit(_) => format!("Edit {}", contact.full_name()),
    };
    layout(&title, &html)
}

/// `GET /contacts/{id}`.
pub fn show(contact: &Contact) -> String {
    let name = contact.full_name();
    let html = format!(
        "<h1>{name}</h1>\n<div>\n<div>Phone: {phone}</div>\n<div>Email: {email}</div>\n</div>\n\
         <p><a href=\"/contacts/{id}/edit\">Edit</a> <a href=\"/contacts\">Back</a></p>\n",
        name = escape(&name),
        phone = escape(&contact.phone),
        email = escape(&contact.email),
        id = contact.id,
    );
    layout(&name, &html)
}

/// Error page for `status`.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let html = format!(
        "<h1>{code} {reason}</h1>\n<p>{message}</p>\n<p><a href=\"/contacts\">Back to contacts</a></p>\n",
        code = status.as_u16(),
        message = escape(message),
    );
    layout(reason, &html)
}
