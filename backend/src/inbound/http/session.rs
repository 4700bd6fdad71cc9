//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: signing a user in or out, reading the current
//! identity, and queueing flash messages.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AuthenticatedUser;
use crate::domain::{Error, UserId, UserName};

use super::flash::FlashMessage;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_NAME_KEY: &str = "name";
const FLASH_KEY: &str = "_flashes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session cookie to the authenticated account.
    pub fn sign_in(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user.user_id().as_ref())
            .and_then(|()| self.0.insert(USER_NAME_KEY, user.name().as_ref()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the identity bound to the session, if any.
    ///
    /// A tampered or stale identity is treated as anonymous rather than an
    /// error; the visitor simply has to log in again.
    pub fn current_user(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };

        let (Some(raw_id), Some(raw_name)) = (read(USER_ID_KEY)?, read(USER_NAME_KEY)?) else {
            return Ok(None);
        };

        match (UserId::new(&raw_id), UserName::new(&raw_name)) {
            (Ok(user_id), Ok(name)) => Ok(Some(AuthenticatedUser::new(user_id, name))),
            _ => {
                tracing::warn!("invalid identity in session cookie");
                Ok(None)
            }
        }
    }

    /// Clear all session state, returning the visitor to anonymous.
    ///
    /// The state map is emptied rather than the session purged so a
    /// follow-up flash message can still ride the same cookie.
    pub fn sign_out(&self) {
        self.0.clear();
    }

    /// Queue a one-time notice for the next rendered page.
    pub fn push_flash(&self, flash: FlashMessage) -> Result<(), Error> {
        let mut queued = self.peek_flashes()?;
        queued.push(flash);
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to queue flash: {error}")))
    }

    /// Drain all queued notices; each is returned exactly once.
    pub fn take_flashes(&self) -> Result<Vec<FlashMessage>, Error> {
        let queued = self.peek_flashes()?;
        if !queued.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        Ok(queued)
    }

    fn peek_flashes(&self) -> Result<Vec<FlashMessage>, Error> {
        self.0
            .get::<Vec<FlashMessage>>(FLASH_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read flashes: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
