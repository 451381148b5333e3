//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries the `users_email_key` unique constraint; the
    /// `(created_at, id)` index backs the listing order.
    users (id) {
        /// Primary key: UUID v4 identifier assigned by the service.
        id -> Uuid,
        /// Human-readable name (2 to 100 characters).
        #[max_length = 100]
        name -> Varchar,
        /// Unique email address, compared case-sensitively.
        #[max_length = 100]
        email -> Varchar,
        /// Role label, defaulting to `user`.
        #[max_length = 50]
        role -> Varchar,
        /// Insert timestamp used for stable listing order.
        created_at -> Timestamptz,
    }
}
