//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_command;
mod calculation_query;
mod calculation_repository;
mod login_service;
mod password_hasher;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use calculation_command::MockCalculationCommand;
pub use calculation_command::CalculationCommand;
#[cfg(test)]
pub use calculation_query::MockCalculationQuery;
pub use calculation_query::CalculationQuery;
#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationRepository, CalculationRepositoryError};
#[cfg(test)]
pub use login_service::{MockBearerAuthenticator, MockLoginService, MockRegistrationService};
pub use login_service::{BearerAuthenticator, LoginOutcome, LoginService, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
