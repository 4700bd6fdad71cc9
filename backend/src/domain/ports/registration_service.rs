//! Driving port for the registration use-case.
//!
//! Inbound adapters call this port to create accounts without knowing the
//! backing infrastructure, which keeps handler tests deterministic: they can
//! substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest};

/// Failure modes of a registration attempt.
///
/// The duplicate variants are user-recoverable and map to specific form
/// messages; everything else collapses into `Internal`, surfaced to the
/// visitor as a generic failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The requested user id is already registered.
    #[error("user id is already taken")]
    DuplicateUserId,
    /// The requested email is already registered.
    #[error("email is already taken")]
    DuplicateEmail,
    /// Hashing or persistence failed; no account was created.
    #[error(transparent)]
    Internal(Error),
}

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create the account described by `request`, or report why not.
    ///
    /// On any error no account exists afterwards; the insert is a single
    /// atomic row write.
    async fn register(&self, request: RegistrationRequest) -> Result<(), RegistrationError>;
}
