//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::error_mapping::{map_diesel_error, map_insert_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

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

/// Convert a database row to a domain user.
///
/// Rows that violate the domain rules surface as query errors; the schema
/// bounds match the domain bounds so this only happens on manual edits.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        role,
        ..
    } = row;
    let id = UserId::from_uuid(id);
    User::try_from_strings(id.as_ref(), name, email, role).map_err(|err| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = UserId::random();
        let row = NewUserRow {
            id: *id.as_uuid(),
            name: new_user.name().as_ref(),
            email: new_user.email().as_ref(),
            role: new_user.role().as_ref(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, new_user.email().as_ref()))?;

        row_to_user(stored)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map_or_else(
            || Err(UserPersistenceError::not_found(id.as_ref())),
            row_to_user,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion checks; database round trips live in
    //! `tests/diesel_user_repository.rs`.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(email: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_owned(),
            email: email.to_owned(),
            role: "user".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_to_user_preserves_fields() {
        let source = row("ada@example.com");
        let expected_id = source.id;

        let user = row_to_user(source).expect("valid row");

        assert_eq!(user.id().as_uuid(), &expected_id);
        assert_eq!(user.email().as_ref(), "ada@example.com");
        assert_eq!(user.role().as_ref(), "user");
    }

    #[rstest]
    fn row_to_user_rejects_invalid_stored_email() {
        let error = row_to_user(row("not-an-email")).expect_err("invalid row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }
}
