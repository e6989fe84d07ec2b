//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoredUser, UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
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

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let user = User::try_from_parts(row.id, &row.username, row.email.as_deref())
        .map_err(|err| UserPersistenceError::query(format!("corrupt user row: {err}")))?;
    Ok(StoredUser {
        user,
        password_hash: PasswordHash::from_encoded(row.password_hash),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, stored: &StoredUser) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = &stored.user;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_str(),
            email: user.email().map(|email| email.as_str()),
            password_hash: stored.password_hash.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match constraint_violation(&err) {
                Some(violation @ ConstraintViolation::Unique(_)) if violation.involves("username") => {
                    UserPersistenceError::duplicate_username(user.username().as_str())
                }
                _ => map_diesel_error(err),
            })
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_stored_user(row).map(|stored| stored.user))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str, email: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            username: username.to_owned(),
            email: email.map(str::to_owned),
            password_hash: "pbkdf2_sha256$1$00$00".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_carry_their_password_hash() {
        let stored = row_to_stored_user(row("ada", Some("ada@example.com"))).expect("valid row");

        assert_eq!(stored.user.username().as_str(), "ada");
        assert_eq!(stored.password_hash.as_str(), "pbkdf2_sha256$1$00$00");
        assert_eq!(
            stored.user.email().map(|email| email.as_str()),
            Some("ada@example.com")
        );
    }

    #[rstest]
    fn invalid_usernames_are_query_errors() {
        let err = row_to_stored_user(row("not valid", None)).expect_err("corrupt row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
