//! End-to-end flows over the full application: a contacts file on disk, the
//! in-memory store and the traced HTTP surface.

use std::io::Write;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use contacts::Trace;
use contacts::domain::{ContactId, ContactStore, StoreSettings};
use contacts::inbound::http::configure;
use contacts::inbound::http::flash::{FLASH_COOKIE, decode_messages};
use contacts::inbound::http::state::HttpState;
use contacts::middleware::trace::TRACE_ID_HEADER;
use contacts::outbound::InMemoryContactStore;

const SEED: &str = r#"[
  {"ID": 1, "First": "John", "Last": "Smith", "Phone": "555-123-4567", "Email": "john@example.com"},
  {"ID": 2, "First": "Jane", "Last": "Doe", "Phone": "", "Email": "jane@example.com"},
  {"ID": 4, "First": "Ada", "Last": "Lovelace", "Phone": "555-987-6543", "Email": "ada@example.com"}
]"#;

#[fixture]
fn store() -> Arc<InMemoryContactStore> {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(SEED.as_bytes()).expect("write seed");
    let store = InMemoryContactStore::load(file.path(), StoreSettings::default())
        .expect("seed file loads");
    Arc::new(store)
}

fn state(store: &Arc<InMemoryContactStore>) -> web::Data<HttpState> {
    let contacts: Arc<dyn ContactStore> = store.clone();
    web::Data::new(HttpState::new(contacts, Arc::new(DefaultClock), false))
}

fn flash_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == FLASH_COOKIE)
        .map(|cookie| cookie.into_owned())
}

async fn body_text(res: ServiceResponse) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

#[rstest]
#[actix_web::test]
async fn created_contact_gets_next_id_and_flash_is_shown_once(store: Arc<InMemoryContactStore>) {
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/contacts/new")
            .set_form([
                ("first_name", "Grace"),
                ("last_name", "Hopper"),
                ("phone", "+1 (555) 010-2030"),
                ("email", "grace@example.com"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let cookie = flash_cookie(&res).expect("flash cookie set");
    assert_eq!(decode_messages(cookie.value()), vec!["Created New Contact!".to_owned()]);
    assert_eq!(
        store.find(ContactId::new(5)).map(|contact| contact.email),
        Ok("grace@example.com".to_owned())
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/contacts").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = flash_cookie(&res).expect("removal cookie");
    assert_eq!(cleared.value(), "");
    let body = body_text(res).await;
    assert!(body.contains("Created New Contact!"));
    assert!(body.contains("(4 total contacts)"));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/contacts").cookie(cleared).to_request(),
    )
    .await;
    assert!(flash_cookie(&res).is_none());
    assert!(!body_text(res).await.contains("Created New Contact!"));
}

#[rstest]
#[actix_web::test]
async fn ids_are_not_reused_after_delete(store: Arc<InMemoryContactStore>) {
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/contacts/4/delete").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/contacts")
    );

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/contacts/new")
            .set_form([
                ("first_name", "Alan"),
                ("last_name", "Turing"),
                ("phone", ""),
                ("email", "alan@example.com"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(store.find(ContactId::new(4)).is_err());
    assert!(store.find(ContactId::new(5)).is_ok());
}

#[rstest]
#[actix_web::test]
async fn search_is_case_insensitive(store: Arc<InMemoryContactStore>) {
    let app = test::init_service(App::new().app_data(state(&store)).configure(configure)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/contacts?q=JOHN").to_request(),
    )
    .await;
    let body = body_text(res).await;
    assert!(body.contains("john@example.com"));
    assert!(!body.contains("jane@example.com"));
}

#[rstest]
#[actix_web::test]
async fn error_pages_carry_the_request_trace_id(store: Arc<InMemoryContactStore>) {
    let app = test::init_service(
        App::new()
            .app_data(state(&store))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/contacts/3").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));

    let res = test::call_service(&app, test::TestRequest::get().uri("/contacts/three").to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("invalid contact id: three"));
}
