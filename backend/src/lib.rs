//! Account portal backend: registration, cookie-session login, and an admin
//! listing over a single PostgreSQL-backed user store.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
