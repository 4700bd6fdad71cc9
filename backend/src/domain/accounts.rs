//! Account service implementing the registration, login, and listing ports
//! over a [`UserRepository`].
//!
//! Registration pre-checks both uniqueness invariants before writing, but
//! the pre-check-then-insert sequence is inherently racy: the repository's
//! constraint mapping is the actual safety net, and its duplicate errors
//! fold into the same variants the pre-check produces.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::password::{hash_password, verify_password};
use super::ports::{
    AuthenticatedUser, InsertUserError, LoginError, LoginService, RegistrationError,
    RegistrationService, UserPersistenceError, UserRepository, UsersQuery,
};
use super::{Error, LoginCredentials, RegistrationRequest, User, UserName};

/// Implements every account use-case over a single user store.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Create a service backed by the given user store.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, request: RegistrationRequest) -> Result<(), RegistrationError> {
        let existing_id = self
            .repository
            .find_by_user_id(request.user_id())
            .await
            .map_err(|err| RegistrationError::Internal(map_persistence_error(err)))?;
        if existing_id.is_some() {
            return Err(RegistrationError::DuplicateUserId);
        }

        let existing_email = self
            .repository
            .find_by_email(request.email())
            .await
            .map_err(|err| RegistrationError::Internal(map_persistence_error(err)))?;
        if existing_email.is_some() {
            return Err(RegistrationError::DuplicateEmail);
        }

        let password_hash = hash_password(request.password()).map_err(|err| {
            RegistrationError::Internal(Error::internal(format!(
                "password hashing failed: {err}"
            )))
        })?;

        let user = request.into_user(password_hash);
        self.repository
            .insert(&user)
            .await
            .map_err(|err| match err {
                InsertUserError::DuplicateUserId => RegistrationError::DuplicateUserId,
                InsertUserError::DuplicateEmail => RegistrationError::DuplicateEmail,
                InsertUserError::Persistence(inner) => {
                    RegistrationError::Internal(map_persistence_error(inner))
                }
            })
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, LoginError> {
        // A name that cannot exist as an account name fails the same way an
        // unknown one does; reporting the difference would leak information.
        let Ok(name) = UserName::new(credentials.name()) else {
            return Err(LoginError::InvalidCredentials);
        };

        let found = self
            .repository
            .find_first_by_name(&name)
            .await
            .map_err(|err| LoginError::Internal(map_persistence_error(err)))?;

        let Some(user) = found else {
            return Err(LoginError::InvalidCredentials);
        };

        match verify_password(credentials.password(), user.password_hash()) {
            Ok(true) => Ok(AuthenticatedUser::new(
                user.user_id().clone(),
                user.name().clone(),
            )),
            Ok(false) => Err(LoginError::InvalidCredentials),
            Err(err) => {
                warn!(user_id = %user.user_id(), "stored password hash failed to parse");
                Err(LoginError::Internal(Error::internal(err.to_string())))
            }
        }
    }
}

#[async_trait]
impl UsersQuery for AccountService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(map_persistence_error)
    }
}
