//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.
//!
//! Both implement synchronous capability ports. Hashing is CPU bound, so the
//! account service calls it from the blocking pool.

mod bcrypt_password_hasher;
mod jwt_token_service;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_token_service::{DEFAULT_TOKEN_TTL, JwtSecret, JwtTokenService};
