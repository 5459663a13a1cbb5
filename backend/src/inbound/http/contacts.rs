//! Contact pages: listing, search, create, show, edit, delete and the inline
//! email check.
//!
//! Successful mutations answer `303 See Other` to `/contacts` with a flash
//! message; rejected forms are re-rendered with their errors and the values
//! the user typed.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::PageNumber;

use crate::domain::{
    Contact, ContactId, Error, Field, InvalidContactId, SaveError, ValidationErrors,
};

use super::ApiResult;
use super::flash::Flash;
use super::forms::{ContactForm, EmailQuery, ListQuery};
use super::state::HttpState;
use super::views::{self, FormMode, Listing};

/// Landing page for the address book.
pub const CONTACTS_PATH: &str = "/contacts";

pub const CREATED_MESSAGE: &str = "Created New Contact!";
pub const UPDATED_MESSAGE: &str = "Updated Contact!";
pub const DELETED_MESSAGE: &str = "Deleted Contact!";

/// Register every contact route.
///
/// `/contacts/new` is registered ahead of `/contacts/{id}` so it is never
/// read as an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(index)
        .service(new_form)
        .service(create)
        .service(show)
        .service(edit_form)
        .service(update)
        .service(delete)
        .service(check_email);
}

fn parse_id(raw: &str) -> ApiResult<ContactId> {
    raw.parse()
        .map_err(|err: InvalidContactId| Error::invalid_request(err.to_string()))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn redirect_with_flash(req: &HttpRequest, flash: &Flash, message: &str) -> ApiResult<HttpResponse> {
    let cookie = flash
        .set(req, message)
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, CONTACTS_PATH))
        .cookie(cookie)
        .finish())
}

fn rejected_form(mode: FormMode, candidate: &Contact, errors: &ValidationErrors) -> HttpResponse {
    html(views::contact_form(mode, candidate, errors))
}

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, CONTACTS_PATH))
        .finish()
}

/// `GET /contacts?page=&q=`: search when `q` is present, otherwise one page.
/// Pending flash messages are shown and cleared.
#[get("/contacts")]
pub async fn index(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let ListQuery { page, q } = query.into_inner();
    let listing = match q {
        Some(query) => {
            let results = state.contacts.search(&query);
            Listing::Search { query, results }
        }
        None => Listing::Page(state.contacts.all(PageNumber::from_query(page.as_deref()))),
    };

    let taken = state.flash.take(&req);
    let body = views::index(&listing, &taken.messages, state.contacts.len());

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if let Some(cookie) = taken.clear_cookie {
        response.cookie(cookie);
    }
    response.body(body)
}

#[get("/contacts/new")]
pub async fn new_form() -> HttpResponse {
    html(views::contact_form(
        FormMode::New,
        &Contact::default(),
        &ValidationErrors::default(),
    ))
}

#[post("/contacts/new")]
pub async fn create(
    req: HttpRequest,
    state: web::Data<HttpState>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let candidate = form.into_inner().into_contact(ContactId::UNASSIGNED);
    match state.contacts.save(&candidate) {
        Ok(_) => redirect_with_flash(&req, &state.flash, CREATED_MESSAGE),
        Err(SaveError::Invalid(errors)) => Ok(rejected_form(FormMode::New, &candidate, &errors)),
        Err(other) => Err(other.into()),
    }
}

#[get("/contacts/{id}")]
pub async fn show(state: web::Data<HttpState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let contact = state.contacts.find(parse_id(&path)?)?;
    Ok(html(views::show(&contact)))
}

#[get("/contacts/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let contact = state.contacts.find(parse_id(&path)?)?;
    Ok(html(views::contact_form(
        FormMode::Edit(contact.id),
        &contact,
        &ValidationErrors::default(),
    )))
}

#[post("/contacts/{id}/edit")]
pub async fn update(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let candidate = form.into_inner().into_contact(id);
    match state.contacts.update(&candidate) {
        Ok(_) => redirect_with_flash(&req, &state.flash, UPDATED_MESSAGE),
        Err(SaveError::Invalid(errors)) => {
            Ok(rejected_form(FormMode::Edit(id), &candidate, &errors))
        }
        Err(other) => Err(other.into()),
    }
}

#[post("/contacts/{id}/delete")]
pub async fn delete(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.contacts.delete(parse_id(&path)?)?;
    redirect_with_flash(&req, &state.flash, DELETED_MESSAGE)
}

/// Inline email check for the edit form: the body is the email error for
/// `email` applied to the stored contact, or empty when it would be accepted.
#[get("/contacts/{id}/email")]
pub async fn check_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> ApiResult<HttpResponse> {
    let mut contact = state.contacts.find(parse_id(&path)?)?;
    contact.email = query.into_inner().email;

    let body = state
        .contacts
        .validate(&contact)
        .message(Field::Email)
        .unwrap_or_default();
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body))
}

#[cfg(test)]
mod tests;
