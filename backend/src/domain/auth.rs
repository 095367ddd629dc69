//! Authentication primitives: credentials, password hashes and tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{EmailAddress, UserValidationError, Username};

/// Minimum password length in bytes.
pub const PASSWORD_MIN_BYTES: usize = 6;
/// Maximum password length in bytes; bcrypt ignores anything beyond this.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Login identifier was missing or blank once trimmed.
    EmptyIdentifier,
    /// Password was blank.
    EmptyPassword,
    /// Password length outside the accepted byte range.
    PasswordLength { min: usize, max: usize },
    /// Email or username failed validation.
    User(UserValidationError),
}

impl CredentialValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyIdentifier => "usernameOrEmail",
            Self::EmptyPassword | Self::PasswordLength { .. } => "password",
            Self::User(inner) => inner.field(),
        }
    }
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "username or email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordLength { min, max } => {
                write!(f, "password must be between {min} and {max} bytes")
            }
            Self::User(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<UserValidationError> for CredentialValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Plaintext password held in memory that is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a password chosen at registration.
    pub fn new(password: &str) -> Result<Self, CredentialValidationError> {
        if !(PASSWORD_MIN_BYTES..=PASSWORD_MAX_BYTES).contains(&password.len()) {
            return Err(CredentialValidationError::PasswordLength {
                min: PASSWORD_MIN_BYTES,
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Wrap a password presented at login; only emptiness is checked.
    fn presented(password: &str) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `identifier` is trimmed and must not be empty after trimming. It is
///   matched against email first, then username.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use calculator::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada", "password").unwrap();
/// assert_eq!(creds.identifier(), "ada");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    pub fn try_from_parts(
        identifier: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyIdentifier);
        }

        Ok(Self {
            identifier: normalized.to_owned(),
            password: Password::presented(password)?,
        })
    }

    /// Email or username supplied by the caller.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    username: Username,
    password: Password,
}

impl Registration {
    /// Validate raw registration inputs. The first failing field wins.
    pub fn try_from_parts(
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Opaque salted password hash. Never serialised or logged.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Token type reported alongside issued tokens.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Signed bearer token and its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            expires_at,
        }
    }

    pub fn as_str(&self) -> &str {
        self.token.as_str()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"**redacted**")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
