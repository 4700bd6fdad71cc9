//! Salted one-way password hashing.
//!
//! Argon2id with the library's recommended parameters; every hash carries
//! its own random salt in PHC string format, so verification needs no
//! out-of-band state.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::user::{PasswordHash, UserValidationError};

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing the plaintext failed.
    #[error("failed to hash password: {message}")]
    Hash { message: String },
    /// The stored hash could not be parsed as a PHC string.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::Hash {
            message: err.to_string(),
        })?;

    PasswordHash::new(hash.to_string()).map_err(|err: UserValidationError| {
        PasswordHashError::Hash {
            message: err.to_string(),
        }
    })
}

/// Verify a plaintext password against a stored hash.
///
/// A wrong password is `Ok(false)`; only an unparseable stored hash is an
/// error, since that indicates corrupted account data rather than a failed
/// login attempt.
pub fn verify_password(password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
    let parsed = argon2::password_hash::PasswordHash::new(hash.as_ref()).map_err(|err| {
        PasswordHashError::MalformedHash {
            message: err.to_string(),
        }
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::MalformedHash {
            message: err.to_string(),
        }),
    }
}
