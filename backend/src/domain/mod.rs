//! Domain primitives, services and ports.
//!
//! Purpose: define the calculator's strongly typed entities and use-cases
//! independently of HTTP and persistence. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Operation / compute: the operation registry.
//! - Calculation / ComputedCalculation: records and the computed-result
//!   contract.
//! - User / UserId / EmailAddress / Username: account identity.
//! - CalculationService / AccountService: use-case implementations.

pub mod account_service;
pub mod auth;
pub mod calculation;
pub mod calculation_service;
pub mod error;
pub mod operation;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, BEARER_TOKEN_TYPE, CredentialValidationError, LoginCredentials,
    PASSWORD_MAX_BYTES, PASSWORD_MIN_BYTES, Password, PasswordHash, Registration,
};
pub use self::calculation::{Calculation, CalculationId, CalculationInputs, ComputedCalculation};
pub use self::calculation_service::CalculationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::operation::{CalculationError, Operation, compute};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, User, UserAccount, UserId, UserValidationError, Username,
};
