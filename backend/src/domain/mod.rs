//! Domain primitives and the account service.
//!
//! Purpose: define the strongly typed account model shared by the HTTP and
//! persistence layers, the password hashing routines, and the use-case
//! service that composes them. Types are immutable; each documents its
//! invariants in Rustdoc.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationRequest, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{hash_password, verify_password, PasswordHashError};
pub use self::user::{
    Email, PasswordHash, Phone, User, UserId, UserName, UserValidationError,
};

/// Convenient result alias for fallible domain operations.
pub type ApiResult<T> = Result<T, Error>;
