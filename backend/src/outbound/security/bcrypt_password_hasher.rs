//! bcrypt-backed `PasswordHasher`.

use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PASSWORD_MAX_BYTES, Password, PasswordHash};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const DUMMY_PASSWORD: &str = "calculator-dummy-password";

/// Salted bcrypt hashing at a fixed cost.
///
/// A throwaway hash at the same cost is computed up front so
/// [`PasswordHasher::verify_dummy`] costs the same as a real check.
#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl BcryptPasswordHasher {
    /// Build a hasher with the given work factor.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Backend`] when bcrypt rejects `cost`
    /// (valid range is 4 to 31).
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)
            .map_err(|err| PasswordHashError::backend(err.to_string()))?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl std::fmt::Debug for BcryptPasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BcryptPasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(password.expose(), self.cost)
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::backend(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        // bcrypt only reads the first 72 bytes; longer input can never match a
        // stored password.
        if password.len() > PASSWORD_MAX_BYTES {
            self.verify_dummy(password);
            return Ok(false);
        }
        bcrypt::verify(password, hash.as_str())
            .map_err(|err| PasswordHashError::backend(err.to_string()))
    }

    fn verify_dummy(&self, password: &str) {
        if let Err(error) = bcrypt::verify(password, &self.dummy_hash) {
            debug!(%error, "dummy password verification failed");
        }
    }
}
