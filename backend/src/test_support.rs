//! Shared helpers for unit and integration tests.
//!
//! Available inside the crate under `cfg(test)` and to integration tests
//! through the `test-support` feature.

use std::sync::Mutex;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use async_trait::async_trait;

use crate::domain::ports::{InsertUserError, UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserId, UserName};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory `UserRepository` honouring the same contract as the Diesel
/// adapter: both uniqueness invariants and the lowest-user-id first-match
/// rule.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Snapshot of every stored account.
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap_or_else(|err| err.into_inner()).clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InsertUserError> {
        let mut users = self.users.lock().unwrap_or_else(|err| err.into_inner());
        if users.iter().any(|u| u.user_id() == user.user_id()) {
            return Err(InsertUserError::DuplicateUserId);
        }
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(InsertUserError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().unwrap_or_else(|err| err.into_inner());
        Ok(users.iter().find(|u| u.user_id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().unwrap_or_else(|err| err.into_inner());
        Ok(users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_first_by_name(
        &self,
        name: &UserName,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().unwrap_or_else(|err| err.into_inner());
        let mut matches: Vec<&User> = users.iter().filter(|u| u.name() == name).collect();
        matches.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(matches.first().map(|u| (*u).clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.lock().unwrap_or_else(|err| err.into_inner());
        let mut all = users.clone();
        all.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(all)
    }
}
