//! Startup configuration.
//!
//! Every environment input is resolved exactly once, here, into plain
//! values; nothing below the server layer reads ambient process state.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;

use crate::inbound::http::state::HttpState;

/// Default post-login destination, outside this system's boundary.
const DEFAULT_LANDING_URL: &str = "https://kodnest-netflix.vercel.app/";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Application settings resolved from the environment at startup.
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Session cookie signing/encryption key.
    pub session_key: Key,
    /// Whether the session cookie carries the `Secure` flag.
    pub cookie_secure: bool,
    /// Listen address for the HTTP server.
    pub bind_addr: SocketAddr,
    /// External destination a successful login redirects to.
    pub landing_url: String,
    /// Whether `/admin` requires an authenticated session.
    pub admin_requires_login: bool,
}

impl AppConfig {
    /// Resolve all settings from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is unset, `BIND_ADDR` does not parse, or
    /// the session key file is unreadable in a release build without
    /// `SESSION_ALLOW_EPHEMERAL=1`.
    pub fn from_env() -> std::io::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_SESSION_KEY_FILE.into());
        let session_key = match std::fs::read(&key_path) {
            Ok(bytes) => Key::derive_from(&bytes),
            Err(e) => {
                let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                    Key::generate()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read session key at {key_path}: {e}"
                    )));
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let landing_url =
            env::var("LANDING_URL").unwrap_or_else(|_| DEFAULT_LANDING_URL.into());

        let admin_requires_login =
            env::var("ADMIN_REQUIRES_LOGIN").ok().as_deref() == Some("1");

        Ok(Self {
            database_url,
            session_key,
            cookie_secure,
            bind_addr,
            landing_url,
            admin_requires_login,
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings and the
    /// handler state.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        state: HttpState,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            state,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
