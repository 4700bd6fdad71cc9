//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Thin adapters only: repository implementations translate between Diesel
//! rows and domain types, and every database error is mapped to a domain
//! persistence error. Row structs and schema definitions stay internal.

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
