//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Unique-constraint violations on insert are reported by constraint name so
//! concurrent registrations racing past the service's pre-check still yield
//! the right duplicate error.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, PasswordHash, User, UserAccount, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const USERNAME_CONSTRAINT: &str = "users_username_key";

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

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match unique_violation_constraint(&error) {
        Some(EMAIL_CONSTRAINT) => return UserPersistenceError::duplicate_email(),
        Some(USERNAME_CONSTRAINT) => return UserPersistenceError::duplicate_username(),
        Some(other) => warn!(constraint = other, "unrecognised unique violation on users"),
        None => {}
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Rebuild domain values from a stored row. Rows that no longer satisfy
/// validation are reported as query errors rather than silently repaired.
fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        UserPersistenceError::query(format!("stored email for user {} is invalid: {err}", row.id))
    })?;
    let username = Username::new(&row.username).map_err(|err| {
        UserPersistenceError::query(format!(
            "stored username for user {} is invalid: {err}",
            row.id
        ))
    })?;
    let user = User::new(
        UserId::from_uuid(row.id),
        email,
        username,
        row.is_active,
        row.created_at,
    );
    Ok(UserAccount {
        user,
        password_hash: PasswordHash::new(row.password_hash),
    })
}

/// Column a single-account lookup filters on.
enum Lookup<'a> {
    Email(&'a str),
    Username(&'a str),
    Id(uuid::Uuid),
}

impl DieselUserRepository {
    async fn find_one(
        &self,
        lookup: Lookup<'_>,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = match lookup {
            Lookup::Email(email) => users::table
                .filter(users::email.eq(email))
                .into_boxed::<Pg>(),
            Lookup::Username(username) => users::table
                .filter(users::username.eq(username))
                .into_boxed::<Pg>(),
            Lookup::Id(id) => users::table.filter(users::id.eq(id)).into_boxed::<Pg>(),
        };

        let row: Option<UserRow> = query
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            email: user.email.as_ref(),
            username: user.username.as_ref(),
            password_hash: user.password_hash.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_account(row).map(|account| account.user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError> {
        self.find_one(Lookup::Email(email)).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        self.find_one(Lookup::Username(username)).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let account = self.find_one(Lookup::Id(*id.as_uuid())).await?;
        Ok(account.map(|account| account.user))
    }
}
