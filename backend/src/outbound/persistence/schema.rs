//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered account table.
    ///
    /// `user_id` is the caller-supplied primary key; `email` carries a
    /// unique constraint (`users_email_key`). Both uniqueness violations
    /// are mapped by constraint name in the repository adapter.
    users (user_id) {
        /// Primary key, chosen by the visitor at registration.
        #[max_length = 50]
        user_id -> Varchar,
        /// Login identifier. Not unique.
        #[max_length = 100]
        name -> Varchar,
        /// Argon2id hash in PHC string format. Never the plaintext.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Unique contact address.
        #[max_length = 120]
        email -> Varchar,
        /// Contact phone number.
        #[max_length = 20]
        phone -> Varchar,
    }
}
