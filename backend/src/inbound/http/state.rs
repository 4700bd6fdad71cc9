//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistrationService, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    /// External destination a successful login redirects to.
    pub landing_url: String,
    /// When set, `/admin` requires an authenticated session.
    pub admin_requires_login: bool,
}

impl HttpState {
    /// Bundle the three account ports with the page settings.
    pub fn new(
        registration: Arc<dyn RegistrationService>,
        login: Arc<dyn LoginService>,
        users: Arc<dyn UsersQuery>,
        landing_url: impl Into<String>,
        admin_requires_login: bool,
    ) -> Self {
        Self {
            registration,
            login,
            users,
            landing_url: landing_url.into(),
            admin_requires_login,
        }
    }
}
