//! Authentication and registration input types.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Plaintext passwords live in [`Zeroizing`] buffers until they are hashed
//! or dropped.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, PasswordHash, Phone, User, UserId, UserName, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `name` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    name: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw name/password inputs.
    pub fn try_from_parts(name: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyName);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            name: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name string suitable for user lookups.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// One of the account fields failed validation.
    Field(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Field(value)
    }
}

/// Validated registration input, one per submitted form.
///
/// Holds the plaintext password zeroized until the registration service
/// hashes it; [`RegistrationRequest::into_user`] consumes the request so the
/// plaintext cannot outlive the operation.
#[derive(Debug)]
pub struct RegistrationRequest {
    user_id: UserId,
    name: UserName,
    password: Zeroizing<String>,
    email: Email,
    phone: Phone,
}

impl RegistrationRequest {
    /// Construct a request from the five raw form fields.
    pub fn try_from_parts(
        user_id: &str,
        name: &str,
        password: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }

        Ok(Self {
            user_id: UserId::new(user_id)?,
            name: UserName::new(name)?,
            password: Zeroizing::new(password.to_owned()),
            email: Email::new(email)?,
            phone: Phone::new(phone)?,
        })
    }

    /// Requested primary key.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Requested login identifier.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested contact address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Build the account record, replacing the plaintext with its hash.
    pub fn into_user(self, password_hash: PasswordHash) -> User {
        let Self {
            user_id,
            name,
            password: _,
            email,
            phone,
        } = self;
        User::new(user_id, name, password_hash, email, phone)
    }
}
