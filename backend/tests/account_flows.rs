//! End-to-end account flows over the full HTTP surface.
//!
//! The app under test is assembled exactly as in production, with the
//! in-memory repository standing in for PostgreSQL and a fresh session key
//! per test.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use backend::domain::{verify_password, AccountService};
use backend::inbound::http::accounts::{
    admin, index, login_form, login_submit, logout, register_form, register_submit,
};
use backend::inbound::http::state::HttpState;
use backend::test_support::{test_session_middleware, InMemoryUserRepository};

const LANDING_URL: &str = "https://kodnest-netflix.vercel.app/";

fn app_state(admin_requires_login: bool) -> (web::Data<HttpState>, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::default());
    let service = Arc::new(AccountService::new(repository.clone()));
    let state = web::Data::new(HttpState::new(
        service.clone(),
        service.clone(),
        service,
        LANDING_URL,
        admin_requires_login,
    ));
    (state, repository)
}

fn account_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .service(index)
        .service(register_form)
        .service(register_submit)
        .service(login_form)
        .service(login_submit)
        .service(admin)
        .service(logout)
}

fn location(response: &ServiceResponse) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn register<S>(
    app: &S,
    user_id: &str,
    name: &str,
    password: &str,
    email: &str,
    phone: &str,
) -> ServiceResponse
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let request = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("user_id", user_id),
            ("name", name),
            ("password", password),
            ("email", email),
            ("phone", phone),
        ])
        .to_request();
    test::call_service(app, request).await
}

async fn login<S>(app: &S, name: &str, password: &str) -> ServiceResponse
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let request = test::TestRequest::post()
        .uri("/login")
        .set_form([("name", name), ("password", password)])
        .to_request();
    test::call_service(app, request).await
}

async fn body_string(response: ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[actix_web::test]
async fn register_login_then_duplicate_user_id_scenario() {
    let (state, repository) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    // Alice registers and is sent to the login page.
    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));

    // Her credentials now authenticate and redirect to the landing page.
    let response = login(&app, "Alice", "pw123").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some(LANDING_URL));
    assert!(session_cookie(&response).is_some());

    // Bob tries to reuse her user id and is turned away on the form itself.
    let response = register(&app, "u1", "Bob", "pw456", "b@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("User ID already exists!"));

    assert_eq!(repository.users().len(), 1);
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let (state, repository) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = register(&app, "u2", "Bob", "pw456", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Email already exists!"));

    assert_eq!(repository.users().len(), 1);
}

#[actix_web::test]
async fn failed_logins_share_one_generic_message_and_grant_no_identity() {
    let (state, _) = app_state(true);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    for (name, password) in [("Alice", "wrong"), ("Nobody", "pw123")] {
        let response = login(&app, name, password).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        let body = body_string(response).await;
        assert!(body.contains("Invalid name or password!"));

        // Whatever cookie came back holds no identity: the gated admin
        // page still treats the client as anonymous.
        let mut request = test::TestRequest::get().uri("/admin");
        if let Some(cookie) = cookie {
            request = request.cookie(cookie);
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn logout_returns_the_client_to_anonymous() {
    let (state, _) = app_state(true);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = login(&app, "Alice", "pw123").await;
    let cookie = session_cookie(&response).expect("login sets a session cookie");

    // The authenticated session passes the admin gate.
    let request = test::TestRequest::get()
        .uri("/admin")
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logout clears the state and redirects to the login page.
    let request = test::TestRequest::get()
        .uri("/logout")
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));
    let cleared = session_cookie(&response).expect("logout rewrites the cookie");

    // The rewritten cookie no longer identifies anyone.
    let request = test::TestRequest::get()
        .uri("/admin")
        .cookie(cleared.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // And the logout notice shows on the login page, exactly once.
    let request = test::TestRequest::get()
        .uri("/login")
        .cookie(cleared)
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = body_string(response).await;
    assert!(body.contains("You have been logged out!"));
}

#[actix_web::test]
async fn logout_without_a_session_still_redirects() {
    let (state, _) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));
}

#[actix_web::test]
async fn admin_lists_every_user_but_never_a_hash() {
    let (state, _) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let response = register(&app, "u2", "Bob", "pw456", "b@x.com", "556").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    // No session required: the admin view is open by default.
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    for expected in ["u1", "Alice", "a@x.com", "555", "u2", "Bob", "b@x.com", "556"] {
        assert!(body.contains(expected), "admin page missing {expected}");
    }
    assert!(!body.contains("argon2"), "admin page leaked a hash");
}

#[actix_web::test]
async fn stored_password_is_hashed_and_verifiable() {
    let (state, repository) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let users = repository.users();
    assert_eq!(users.len(), 1);
    let stored = &users[0];
    assert_ne!(stored.password_hash().as_ref(), "pw123");
    assert!(verify_password("pw123", stored.password_hash()).expect("hash parses"));
    assert!(!verify_password("pw124", stored.password_hash()).expect("hash parses"));
}

#[actix_web::test]
async fn registration_notice_shows_exactly_once() {
    let (state, _) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response = register(&app, "u1", "Alice", "pw123", "a@x.com", "555").await;
    let cookie = session_cookie(&response).expect("flash rides the session cookie");

    let request = test::TestRequest::get()
        .uri("/login")
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, request).await;
    let drained = session_cookie(&response).expect("drained session rewrites the cookie");
    let body = body_string(response).await;
    assert!(body.contains("Registration successful! Please login."));

    let request = test::TestRequest::get()
        .uri("/login")
        .cookie(drained)
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = body_string(response).await;
    assert!(!body.contains("Registration successful! Please login."));
}

#[actix_web::test]
async fn index_redirects_to_the_login_page() {
    let (state, _) = app_state(false);
    let app = test::init_service(account_app(state)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));
}
