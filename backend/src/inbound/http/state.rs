//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BearerAuthenticator, CalculationCommand, CalculationQuery, LoginService, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use calculator::domain::{AccountService, CalculationService};
/// use calculator::inbound::http::state::HttpState;
/// use calculator::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService};
/// use calculator::test_support::{InMemoryCalculationRepository, InMemoryUserRepository};
///
/// let accounts = Arc::new(AccountService::new(
///     Arc::new(InMemoryUserRepository::new()),
///     Arc::new(BcryptPasswordHasher::new(4).expect("valid cost")),
///     Arc::new(JwtTokenService::new(
///         &JwtSecret::new("doc-secret"),
///         std::time::Duration::from_secs(60),
///         Arc::new(mockable::DefaultClock),
///     )),
/// ));
/// let calculations = Arc::new(CalculationService::new(Arc::new(
///     InMemoryCalculationRepository::new(),
/// )));
/// let state = HttpState {
///     registration: accounts.clone(),
///     login: accounts.clone(),
///     authenticator: accounts,
///     calculations: calculations.clone(),
///     calculations_query: calculations,
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub calculations: Arc<dyn CalculationCommand>,
    pub calculations_query: Arc<dyn CalculationQuery>,
}
