//! Driving port for the login use-case.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId, UserName};

/// Identity established by a successful login, ready to persist in the
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    name: UserName,
}

impl AuthenticatedUser {
    /// Bundle the identity of a verified account.
    pub fn new(user_id: UserId, name: UserName) -> Self {
        Self { user_id, name }
    }

    /// Primary key of the authenticated account.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Login identifier of the authenticated account.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

/// Failure modes of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Unknown name or wrong password. Deliberately one variant for both so
    /// callers cannot leak which part was wrong.
    #[error("invalid name or password")]
    InvalidCredentials,
    /// The store or the hash verification failed unexpectedly.
    #[error(transparent)]
    Internal(Error),
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, LoginError>;
}
