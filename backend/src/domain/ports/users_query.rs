//! Driving port for the admin user listing.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing every registered account.
///
/// Whether the caller must be authenticated is an inbound concern; the query
/// itself takes no subject (see the admin gate flag in the server config).
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all accounts, ordered by `user_id`.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
