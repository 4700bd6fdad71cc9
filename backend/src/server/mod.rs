//! Server construction and middleware wiring.

mod config;

pub use config::{AppConfig, ServerConfig};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use crate::inbound::http::accounts::{
    admin, index, login_form, login_submit, logout, register_form, register_submit,
};
use crate::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    // Every page reads or writes the session (flash messages at minimum),
    // so the middleware wraps the whole app rather than a scope.
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    App::new()
        .app_data(state)
        .wrap(session)
        .service(index)
        .service(register_form)
        .service(register_submit)
        .service(login_form)
        .service(login_submit)
        .service(admin)
        .service(logout)
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        state,
    } = config;

    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            state: state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?;

    Ok(server.run())
}
