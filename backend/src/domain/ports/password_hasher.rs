//! Capability port for salted, adaptive password hashing.
//!
//! Implementations are CPU bound; callers run them on the blocking pool.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification could not be performed.
        Backend { message: String } => "password hashing failed: {message}",
    }
}

/// Hash and verify passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash for `password`.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;

    /// Spend the same effort as [`Self::verify`] without a stored hash, so a
    /// login for an unknown user takes as long as one with a bad password.
    fn verify_dummy(&self, password: &str);
}
