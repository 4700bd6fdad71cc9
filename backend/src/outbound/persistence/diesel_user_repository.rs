//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! A thin adapter: it translates between Diesel rows and domain types and
//! maps database failures onto the port's error types. Uniqueness
//! violations are distinguished by constraint name so a registration that
//! loses the pre-check race still produces the right duplicate error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{InsertUserError, UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserId, UserName};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Constraint name of the primary key on `users.user_id`.
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";
/// Constraint name of the unique index on `users.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserPersistenceError::query("database error"),
        _ => UserPersistenceError::query("database error"),
    }
}

/// Map insert failures, resolving uniqueness violations by constraint name.
fn map_insert_error(error: diesel::result::Error) -> InsertUserError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        match info.constraint_name() {
            Some(PRIMARY_KEY_CONSTRAINT) => return InsertUserError::DuplicateUserId,
            Some(EMAIL_UNIQUE_CONSTRAINT) => return InsertUserError::DuplicateEmail,
            _ => {}
        }
    }

    InsertUserError::Persistence(map_diesel_error(error))
}

/// Convert a database row to a domain `User`.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from_strings(row.user_id, row.name, row.password_hash, row.email, row.phone)
        .map_err(|err| UserPersistenceError::query(format!("corrupted user row: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InsertUserError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| InsertUserError::Persistence(map_pool_error(err)))?;

        let row = NewUserRow {
            user_id: user.user_id().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_ref(),
            email: user.email().as_ref(),
            phone: user.phone().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_user_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::user_id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_first_by_name(
        &self,
        name: &UserName,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Names are not unique; the lowest user_id wins so "the first
        // match" is the same record on every call.
        let row: Option<UserRow> = users::table
            .filter(users::name.eq(name.as_ref()))
            .order(users::user_id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::user_id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct ConstraintViolation {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ConstraintViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintViolation { constraint }),
        )
    }

    #[rstest]
    fn primary_key_violation_maps_to_duplicate_user_id() {
        let err = map_insert_error(unique_violation(Some(PRIMARY_KEY_CONSTRAINT)));
        assert_eq!(err, InsertUserError::DuplicateUserId);
    }

    #[rstest]
    fn email_violation_maps_to_duplicate_email() {
        let err = map_insert_error(unique_violation(Some(EMAIL_UNIQUE_CONSTRAINT)));
        assert_eq!(err, InsertUserError::DuplicateEmail);
    }

    #[rstest]
    fn unknown_constraint_falls_through_to_persistence_error() {
        let err = map_insert_error(unique_violation(Some("users_some_other_key")));
        assert!(matches!(err, InsertUserError::Persistence(_)));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn corrupted_rows_surface_as_query_errors() {
        let row = UserRow {
            user_id: String::new(),
            name: "Alice".into(),
            password_hash: "$argon2id$hash".into(),
            email: "a@x.com".into(),
            phone: "555".into(),
        };
        let err = row_to_user(row).expect_err("blank user id must fail");
        assert!(err.to_string().contains("corrupted user row"));
    }
}
