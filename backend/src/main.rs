//! Backend entry-point: resolves configuration, prepares the user store,
//! and serves the account pages.

use std::sync::Arc;

use actix_web::cookie::SameSite;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::AccountService;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{run_migrations, DbPool, DieselUserRepository, PoolConfig};
use backend::server::{create_server, AppConfig, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;

    let database_url = config.database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("pool construction failed: {err}")))?;
    info!("using PostgreSQL user store");

    let repository = Arc::new(DieselUserRepository::new(pool));
    let service = Arc::new(AccountService::new(repository));
    let state = HttpState::new(
        service.clone(),
        service.clone(),
        service,
        config.landing_url.clone(),
        config.admin_requires_login,
    );

    let server = create_server(ServerConfig::new(
        config.session_key.clone(),
        config.cookie_secure,
        SameSite::Lax,
        config.bind_addr,
        state,
    ))?;

    info!(addr = %config.bind_addr, "account portal listening");
    server.await
}
