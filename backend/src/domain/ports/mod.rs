//! Domain ports.
//!
//! Driving ports ([`RegistrationService`], [`LoginService`], [`UsersQuery`])
//! are what inbound adapters call; the driven port ([`UserRepository`]) is
//! what outbound adapters implement.

mod login_service;
mod registration_service;
mod user_repository;
mod users_query;

pub use login_service::{AuthenticatedUser, LoginError, LoginService};
pub use registration_service::{RegistrationError, RegistrationService};
pub use user_repository::{InsertUserError, UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
