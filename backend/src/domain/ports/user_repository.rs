//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Email, User, UserId, UserName};

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Outcome of an insert that may collide with an existing account.
///
/// The duplicate variants cover both the pre-check and the constraint
/// violation raised when a concurrent registration wins the race between
/// the pre-check and the write; adapters are required to map the store's
/// uniqueness violations onto them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertUserError {
    /// An account with the same user id already exists.
    #[error("user id is already taken")]
    DuplicateUserId,
    /// An account with the same email already exists.
    #[error("email is already taken")]
    DuplicateEmail,
    /// The store failed for reasons unrelated to uniqueness.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Port for the user store.
///
/// Create/read only: the account lifecycle exposes no update or delete.
/// `find_first_by_name` resolves duplicate names deterministically to the
/// account with the lowest `user_id`; callers relying on "the first match"
/// get the same record on every invocation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account as a single atomic insert.
    async fn insert(&self, user: &User) -> Result<(), InsertUserError>;

    /// Fetch an account by primary key.
    async fn find_by_user_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account by its unique email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the first account with the given name, lowest `user_id` first.
    async fn find_first_by_name(
        &self,
        name: &UserName,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every account, ordered by `user_id`.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
