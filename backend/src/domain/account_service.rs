//! Credential service: registration, login and bearer authentication.
//!
//! Password hashing is CPU bound and runs on Tokio's blocking pool. Hashing
//! and signing sit behind the [`PasswordHasher`] and [`TokenService`] ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    BearerAuthenticator, LoginOutcome, LoginService, PasswordHashError, PasswordHasher,
    RegistrationService, TokenError, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordHash, Registration, User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const INVALID_TOKEN: &str = "Could not validate credentials";
const INACTIVE_ACCOUNT: &str = "user account is inactive";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => duplicate_email(),
        UserPersistenceError::DuplicateUsername => duplicate_username(),
    }
}

fn duplicate_email() -> Error {
    Error::invalid_request("Email already registered")
        .with_details(json!({ "field": "email", "code": "duplicate_email" }))
}

fn duplicate_username() -> Error {
    Error::invalid_request("Username already taken")
        .with_details(json!({ "field": "username", "code": "duplicate_username" }))
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS)
}

/// Run CPU-bound hashing work off the async executor.
///
/// Errors must be built after this returns so they pick up the request's
/// trace id; the blocking pool does not inherit task-locals.
async fn run_blocking<T, F>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))
}

/// Account service implementing registration, login and token
/// authentication.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    /// Create a new account service from its driven ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    async fn find_account(&self, identifier: &str) -> Result<Option<UserAccount>, Error> {
        if let Some(account) = self
            .users
            .find_by_email(identifier)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(Some(account));
        }
        self.users
            .find_by_username(identifier)
            .await
            .map_err(map_repository_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.verify(password.as_str(), &hash))
            .await?
            .map_err(map_hash_error)
    }

    async fn burn_dummy_verification(&self, password: &str) -> Result<(), Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.verify_dummy(password.as_str())).await
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        if self
            .users
            .find_by_email(registration.email().as_ref())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(duplicate_email());
        }
        if self
            .users
            .find_by_username(registration.username().as_ref())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(duplicate_username());
        }

        let hasher = Arc::clone(&self.hasher);
        let password = registration.password().clone();
        let password_hash = run_blocking(move || hasher.hash(&password))
            .await?
            .map_err(map_hash_error)?;

        let new_user = NewUser {
            id: UserId::random(),
            email: registration.email().clone(),
            username: registration.username().clone(),
            password_hash,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(account) = self.find_account(credentials.identifier()).await? else {
            self.burn_dummy_verification(credentials.password()).await?;
            warn!("login failed: unknown identifier");
            return Err(invalid_credentials());
        };

        let UserAccount {
            user,
            password_hash,
        } = account;
        if !self
            .verify_password(credentials.password(), password_hash)
            .await?
        {
            warn!(user_id = %user.id(), "login failed: password mismatch");
            return Err(invalid_credentials());
        }
        if !user.is_active() {
            warn!(user_id = %user.id(), "login refused: account inactive");
            return Err(Error::forbidden(INACTIVE_ACCOUNT));
        }

        let token = self
            .tokens
            .issue(user.id())
            .map_err(|err| Error::internal(err.to_string()))?;

        info!(user_id = %user.id(), "user logged in");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl BearerAuthenticator for AccountService {
    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.verify(token).map_err(|err| match err {
            TokenError::Signing { message } => Error::internal(message),
            TokenError::Expired => Error::unauthorized("Token has expired"),
            TokenError::Invalid { .. } => Error::unauthorized(INVALID_TOKEN),
        })?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))?;

        if !user.is_active() {
            return Err(Error::forbidden(INACTIVE_ACCOUNT));
        }
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
