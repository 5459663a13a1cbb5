//! Handler tests for the contact pages.

use super::*;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;

use crate::inbound::http::flash::{FLASH_COOKIE, decode_messages, encode_messages};
use crate::inbound::http::test_utils::{sample_contacts, test_state};

async fn send(state: &HttpState, req: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn flash_messages(res: &ServiceResponse) -> Vec<String> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == FLASH_COOKIE)
        .map(|cookie| decode_messages(cookie.value()))
        .unwrap_or_default()
}

async fn body_text(res: ServiceResponse) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

fn form(first: &str, last: &str, phone: &str, email: &str) -> [(&'static str, String); 4] {
    [
        ("first_name", first.to_owned()),
        ("last_name", last.to_owned()),
        ("phone", phone.to_owned()),
        ("email", email.to_owned()),
    ]
}

#[rstest]
#[actix_web::test]
async fn root_redirects_to_listing() {
    let state = test_state(Vec::new());
    let res = send(&state, test::TestRequest::get().uri("/")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(CONTACTS_PATH));
}

#[rstest]
#[case("/contacts", 5, true)]
#[case("/contacts?page=abc", 5, true)]
#[case("/contacts?page=3", 2, false)]
#[case("/contacts?page=4", 0, false)]
#[actix_web::test]
async fn listing_is_paginated(#[case] uri: &str, #[case] rows: usize, #[case] next: bool) {
    let state = test_state(sample_contacts(12));
    let res = send(&state, test::TestRequest::get().uri(uri)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_text(res).await;
    assert_eq!(body.matches("<tr><td>").count(), rows);
    assert_eq!(body.contains("rel=\"next\""), next);
}

#[rstest]
#[actix_web::test]
async fn search_ignores_pagination() {
    let state = test_state(sample_contacts(12));
    let res = send(&state, test::TestRequest::get().uri("/contacts?q=FIRST1&page=2")).await;
    let body = body_text(res).await;
    // First1, First10, First11, First12
    assert_eq!(body.matches("<tr><td>").count(), 4);
    assert!(!body.contains("pagination"));
}

#[rstest]
#[actix_web::test]
async fn listing_shows_and_clears_flash_messages() {
    let state = test_state(sample_contacts(1));
    let cookie = Cookie::new(
        FLASH_COOKIE,
        encode_messages(&[DELETED_MESSAGE.to_owned()]).expect("encodes"),
    );
    let res = send(&state, test::TestRequest::get().uri("/contacts").cookie(cookie)).await;

    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == FLASH_COOKIE)
        .map(|cookie| cookie.value().to_owned());
    assert_eq!(cleared.as_deref(), Some(""));
    assert!(body_text(res).await.contains(DELETED_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn create_redirects_with_flash() {
    let state = test_state(sample_contacts(12));
    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/new")
            .set_form(form("Grace", "Hopper", "555-123-4567", "grace@example.com")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(CONTACTS_PATH));
    assert_eq!(flash_messages(&res), vec![CREATED_MESSAGE.to_owned()]);
    let stored = state.contacts.find(ContactId::new(13)).expect("new contact stored");
    assert_eq!(stored.email, "grace@example.com");
}

#[rstest]
#[actix_web::test]
async fn invalid_create_renders_errors_without_storing() {
    let state = test_state(sample_contacts(2));
    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/new")
            .set_form(form("G", "Hopper", "12345", "person1@example.com")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(flash_messages(&res).is_empty());
    let body = body_text(res).await;
    assert!(body.contains("First name must be at least 2 characters"));
    assert!(body.contains("Email already exists"));
    assert!(body.contains("Phone number must have at least 10 digits"));
    assert!(body.contains("value=\"Hopper\""));
    assert_eq!(state.contacts.len(), 2);
}

#[rstest]
#[case("/contacts/99", StatusCode::NOT_FOUND)]
#[case("/contacts/abc", StatusCode::BAD_REQUEST)]
#[case("/contacts/99/edit", StatusCode::NOT_FOUND)]
#[case("/contacts/-1/edit", StatusCode::BAD_REQUEST)]
#[case("/contacts/99/email?email=x@example.com", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn unknown_or_malformed_ids_fail(#[case] uri: &str, #[case] status: StatusCode) {
    let state = test_state(sample_contacts(3));
    let res = send(&state, test::TestRequest::get().uri(uri)).await;
    assert_eq!(res.status(), status);
}

#[rstest]
#[actix_web::test]
async fn new_form_is_not_read_as_an_id() {
    let state = test_state(Vec::new());
    let res = send(&state, test::TestRequest::get().uri("/contacts/new")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("action=\"/contacts/new\""));
}

#[rstest]
#[actix_web::test]
async fn show_and_edit_render_the_contact() {
    let state = test_state(sample_contacts(3));
    let res = send(&state, test::TestRequest::get().uri("/contacts/2")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("First2 Last2"));

    let res = send(&state, test::TestRequest::get().uri("/contacts/2/edit")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("value=\"person2@example.com\""));
    assert!(body.contains("action=\"/contacts/2/delete\""));
}

#[rstest]
#[actix_web::test]
async fn update_keeps_email_and_redirects() {
    let state = test_state(sample_contacts(3));
    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/2/edit")
            .set_form(form("Renamed", "Person", "555-000-0000", "person2@example.com")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(flash_messages(&res), vec![UPDATED_MESSAGE.to_owned()]);
    let stored = state.contacts.find(ContactId::new(2)).expect("still stored");
    assert_eq!(stored.first, "Renamed");
    assert_eq!(state.contacts.len(), 3);
}

#[rstest]
#[actix_web::test]
async fn invalid_update_leaves_contact_untouched() {
    let state = test_state(sample_contacts(3));
    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/2/edit")
            .set_form(form("Renamed", "Person", "555-000-0000", "person3@example.com")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Email already exists"));
    let stored = state.contacts.find(ContactId::new(2)).expect("still stored");
    assert_eq!(stored.first, "First2");
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_contact_is_not_found() {
    let state = test_state(sample_contacts(1));
    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/9/edit")
            .set_form(form("Nobody", "Here", "", "nobody@example.com")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.contacts.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn edit_after_delete_does_not_restore_contact() {
    let state = test_state(sample_contacts(3));
    let res = send(&state, test::TestRequest::post().uri("/contacts/2/delete")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = send(
        &state,
        test::TestRequest::post()
            .uri("/contacts/2/edit")
            .set_form(form("Back", "Again", "", "back@example.com")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.contacts.len(), 2);
    assert!(state.contacts.find(ContactId::new(2)).is_err());
}

#[rstest]
#[actix_web::test]
async fn delete_redirects_with_flash() {
    let state = test_state(sample_contacts(3));
    let res = send(&state, test::TestRequest::post().uri("/contacts/2/delete")).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(flash_messages(&res), vec![DELETED_MESSAGE.to_owned()]);
    assert!(state.contacts.find(ContactId::new(2)).is_err());
    assert_eq!(state.contacts.len(), 2);
}

#[rstest]
#[actix_web::test]
async fn delete_of_unknown_contact_is_not_found() {
    let state = test_state(sample_contacts(3));
    let res = send(&state, test::TestRequest::post().uri("/contacts/7/delete")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.contacts.len(), 3);
}

#[rstest]
#[case("person1@example.com", "")]
#[case("person2@example.com", "Email already exists")]
#[case("not-an-email", "Invalid email format")]
#[case("", "Email is required")]
#[actix_web::test]
async fn email_check_reports_email_errors(#[case] email: &str, #[case] expected: &str) {
    let state = test_state(sample_contacts(2));
    let res = send(
        &state,
        test::TestRequest::get().uri(&format!("/contacts/1/email?email={email}")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body_text(res).await, expected);
}
