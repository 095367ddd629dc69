//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use calculator::outbound::persistence::DbPool;
use calculator::outbound::security::{DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL, JwtSecret};

/// Inputs for the credential adapters.
pub struct CredentialConfig {
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) token_ttl: Duration,
    pub(crate) bcrypt_cost: u32,
}

impl CredentialConfig {
    /// Default lifetime and cost with the given signing secret.
    #[must_use]
    pub fn new(jwt_secret: JwtSecret) -> Self {
        Self {
            jwt_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) credentials: CredentialConfig,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, credentials: CredentialConfig) -> Self {
        Self {
            bind_addr,
            db_pool,
            credentials,
        }
    }
}
