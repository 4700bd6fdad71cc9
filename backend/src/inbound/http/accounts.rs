//! Account page handlers.
//!
//! ```text
//! GET  /          -> 302 /login
//! GET  /register  -> registration form
//! POST /register  -> create account, redirect to /login on success
//! GET  /login     -> login form
//! POST /login     -> establish session, redirect to the landing page
//! GET  /admin     -> listing of all accounts
//! GET  /logout    -> clear session, redirect to /login
//! ```
//!
//! Failure paths re-render the submitted form with a flash message instead
//! of redirecting, mirroring the flash-then-render flow of a classic form
//! application: duplicate conflicts keep HTTP 200, malformed field values
//! get 400.

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::ports::{LoginError, RegistrationError};
use crate::domain::{LoginCredentials, RegistrationRequest};

use super::error::ApiResult;
use super::flash::FlashMessage;
use super::pages::{self, UserListing};
use super::session::SessionContext;
use super::state::HttpState;

/// Registration form fields, named exactly as the template inputs.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub user_id: String,
    pub name: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn html_bad_request(body: String) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Flash a message and render the page it belongs on, draining anything
/// already queued so notices keep their one-time semantics.
fn flash_and_render(
    session: &SessionContext,
    flash: FlashMessage,
    page: impl FnOnce(&[FlashMessage]) -> ApiResult<String>,
) -> ApiResult<String> {
    session.push_flash(flash)?;
    let flashes = session.take_flashes()?;
    page(&flashes)
}

/// Entry point; nothing to show here, so send the visitor to the login form.
#[get("/")]
pub async fn index() -> HttpResponse {
    redirect("/login")
}

/// Show the registration form.
#[get("/register")]
pub async fn register_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(html(pages::register_page(&flashes)?))
}

/// Create an account from the submitted form.
#[post("/register")]
pub async fn register_submit(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    let request = match RegistrationRequest::try_from_parts(
        &form.user_id,
        &form.name,
        &form.password,
        &form.email,
        &form.phone,
    ) {
        Ok(request) => request,
        Err(err) => {
            let body = flash_and_render(
                &session,
                FlashMessage::error(err.to_string()),
                pages::register_page,
            )?;
            return Ok(html_bad_request(body));
        }
    };

    let user_id = request.user_id().clone();
    match state.registration.register(request).await {
        Ok(()) => {
            info!(user_id = %user_id, "account registered");
            session.push_flash(FlashMessage::success(
                "Registration successful! Please login.",
            ))?;
            Ok(redirect("/login"))
        }
        Err(RegistrationError::DuplicateUserId) => {
            let body = flash_and_render(
                &session,
                FlashMessage::error("User ID already exists!"),
                pages::register_page,
            )?;
            Ok(html(body))
        }
        Err(RegistrationError::DuplicateEmail) => {
            let body = flash_and_render(
                &session,
                FlashMessage::error("Email already exists!"),
                pages::register_page,
            )?;
            Ok(html(body))
        }
        Err(RegistrationError::Internal(err)) => {
            error!(error = %err, "registration failed");
            let body = flash_and_render(
                &session,
                FlashMessage::error("Registration failed. Please try again."),
                pages::register_page,
            )?;
            Ok(html(body))
        }
    }
}

/// Show the login form.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(html(pages::login_page(&flashes)?))
}

/// Authenticate and establish the session.
#[post("/login")]
pub async fn login_submit(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match LoginCredentials::try_from_parts(&form.name, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            let body = flash_and_render(
                &session,
                FlashMessage::error(err.to_string()),
                pages::login_page,
            )?;
            return Ok(html_bad_request(body));
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.sign_in(&user)?;
            session.push_flash(FlashMessage::success("Login successful!"))?;
            info!(user_id = %user.user_id(), "login succeeded");
            Ok(redirect(&state.landing_url))
        }
        // One message for unknown name and wrong password alike.
        Err(LoginError::InvalidCredentials) => {
            let body = flash_and_render(
                &session,
                FlashMessage::error("Invalid name or password!"),
                pages::login_page,
            )?;
            Ok(html(body))
        }
        Err(LoginError::Internal(err)) => Err(err),
    }
}

/// List every registered account.
#[get("/admin")]
pub async fn admin(session: SessionContext, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    if state.admin_requires_login && session.current_user()?.is_none() {
        return Err(crate::domain::Error::unauthorized("login required"));
    }

    let users = state.users.list_users().await?;
    let listings: Vec<UserListing> = users.iter().map(UserListing::from).collect();
    let flashes = session.take_flashes()?;
    Ok(html(pages::admin_page(&flashes, &listings)?))
}

/// Drop all session state and return to the login form.
///
/// Idempotent: an anonymous visitor gets the same notice and redirect.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.sign_out();
    session.push_flash(FlashMessage::info("You have been logged out!"))?;
    Ok(redirect("/login"))
}
