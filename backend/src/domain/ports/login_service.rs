//! Driving ports for account registration, login and bearer authentication.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them
//! without knowing (or importing) the hashing, signing or persistence
//! infrastructure. HTTP handler tests substitute mocks for them.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration, User};

/// Successful login: the signed token and the public user fields.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new account and return its public fields.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token.
    ///
    /// Unknown identifiers and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Domain use-case port for validating presented bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BearerAuthenticator: Send + Sync {
    /// Resolve a token to the active user it was issued for.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
}
