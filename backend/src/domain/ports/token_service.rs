//! Capability port for issuing and validating bearer tokens.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Token failures. Every variant maps to `401 Unauthorized` except
    /// [`TokenError::Signing`].
    pub enum TokenError {
        /// The token could not be created.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, has a bad signature, or an invalid subject.
        Invalid { message: String } => "invalid token: {message}",
        /// The token's expiry has passed.
        Expired => "token has expired",
    }
}

/// Issue and verify signed bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token whose subject is `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;

    /// Validate a token and return its subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
