//! Account entity and its validated field types.
//!
//! Every field of a [`User`] is held behind a newtype whose constructor
//! enforces the column constraints, so an invalid account can never be
//! represented once it leaves the inbound layer.

use std::fmt;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUserId,
    UserIdTooLong { max: usize },
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    EmailMissingAtSign,
    EmptyPhone,
    PhoneTooLong { max: usize },
    EmptyPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserId => write!(f, "user id must not be empty"),
            Self::UserIdTooLong { max } => {
                write!(f, "user id must be at most {max} characters")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmailMissingAtSign => write!(f, "email must contain an @ sign"),
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::PhoneTooLong { max } => write!(f, "phone must be at most {max} characters"),
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Maximum allowed length for a user id.
pub const USER_ID_MAX: usize = 50;
/// Maximum allowed length for a name.
pub const NAME_MAX: usize = 100;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 120;
/// Maximum allowed length for a phone number.
pub const PHONE_MAX: usize = 20;

/// Caller-supplied primary key for an account.
///
/// Unlike a generated surrogate key, the user picks this value at
/// registration and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from raw input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUserId);
        }
        if trimmed.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::UserIdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Login identifier shown to other users. Not unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from raw input.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Contact address, unique across accounts.
///
/// Validation stops at the shape a mail relay minimally needs; anything
/// stricter belongs to a verification flow, not the data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from raw input.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !trimmed.contains('@') {
            return Err(UserValidationError::EmailMissingAtSign);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Contact phone number. No uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Validate and construct a [`Phone`] from raw input.
    pub fn new(phone: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = phone.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyPhone);
        }
        if trimmed.chars().count() > PHONE_MAX {
            return Err(UserValidationError::PhoneTooLong { max: PHONE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Salted one-way password hash in PHC string format.
///
/// The plaintext never reaches this type; see [`crate::domain::password`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed PHC hash string.
    pub fn new(hash: impl Into<String>) -> Result<Self, UserValidationError> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }
}

// Keep hashes out of debug output; a hash is not a secret but has no
// business in logs either.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

macro_rules! string_newtype_impls {
    ($($name:ident),+ $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.0.as_str())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )+
    };
}

string_newtype_impls!(UserId, UserName, Email, Phone);

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

/// A registered account.
///
/// ## Invariants
/// - `user_id` and `email` are unique across all accounts (enforced by the
///   user store at write time).
/// - `password_hash` never equals the plaintext it was derived from.
///
/// An account is created exactly once at registration and never mutated by
/// any exposed operation, so the type offers no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    user_id: UserId,
    name: UserName,
    password_hash: PasswordHash,
    email: Email,
    phone: Phone,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        user_id: UserId,
        name: UserName,
        password_hash: PasswordHash,
        email: Email,
        phone: Phone,
    ) -> Self {
        Self {
            user_id,
            name,
            password_hash,
            email,
            phone,
        }
    }

    /// Fallible constructor from raw string inputs.
    pub fn try_from_strings(
        user_id: impl AsRef<str>,
        name: impl AsRef<str>,
        password_hash: impl Into<String>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(user_id)?,
            UserName::new(name)?,
            PasswordHash::new(password_hash)?,
            Email::new(email)?,
            Phone::new(phone)?,
        ))
    }

    /// Caller-supplied primary key.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Login identifier.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Stored one-way hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Unique contact address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Contact phone number.
    pub fn phone(&self) -> &Phone {
        &self.phone
    }
}
