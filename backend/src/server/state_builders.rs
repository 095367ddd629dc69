//! Builders wiring repositories and credential adapters into [`HttpState`].

use std::sync::Arc;

use mockable::DefaultClock;

use calculator::domain::ports::{CalculationRepository, PasswordHashError, UserRepository};
use calculator::domain::{AccountService, CalculationService};
use calculator::inbound::http::state::HttpState;
use calculator::outbound::persistence::{DbPool, DieselCalculationRepository, DieselUserRepository};
use calculator::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::config::CredentialConfig;

/// Build handler state from any repository pair.
///
/// # Errors
/// Returns [`PasswordHashError`] when the bcrypt cost is out of range.
pub(crate) fn build_state_with<R>(
    calculations: Arc<R>,
    users: Arc<dyn UserRepository>,
    credentials: &CredentialConfig,
) -> Result<HttpState, PasswordHashError>
where
    R: CalculationRepository + 'static,
{
    let hasher = BcryptPasswordHasher::new(credentials.bcrypt_cost)?;
    let tokens = JwtTokenService::new(
        &credentials.jwt_secret,
        credentials.token_ttl,
        Arc::new(DefaultClock),
    );
    let accounts = Arc::new(AccountService::new(
        users,
        Arc::new(hasher),
        Arc::new(tokens),
    ));
    let calculations = Arc::new(CalculationService::new(calculations));

    Ok(HttpState {
        registration: accounts.clone(),
        login: accounts.clone(),
        authenticator: accounts,
        calculations: calculations.clone(),
        calculations_query: calculations,
    })
}

/// Build handler state backed by the Diesel repositories.
pub(crate) fn build_http_state(
    pool: &DbPool,
    credentials: &CredentialConfig,
) -> Result<HttpState, PasswordHashError> {
    build_state_with(
        Arc::new(DieselCalculationRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
        credentials,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculator::domain::{CalculationInputs, LoginCredentials, Registration};
    use calculator::outbound::security::JwtSecret;
    use calculator::test_support::{InMemoryCalculationRepository, InMemoryUserRepository};
    use pagination::PageParams;
    use rstest::rstest;

    fn credentials(cost: u32) -> CredentialConfig {
        CredentialConfig::new(JwtSecret::new("state-builder-secret")).with_bcrypt_cost(cost)
    }

    fn in_memory_state(cost: u32) -> Result<HttpState, PasswordHashError> {
        build_state_with(
            Arc::new(InMemoryCalculationRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            &credentials(cost),
        )
    }

    #[rstest]
    fn invalid_bcrypt_cost_is_reported() {
        assert!(in_memory_state(3).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn account_ports_share_one_service() {
        let state = in_memory_state(4).expect("state");
        let registration = Registration::try_from_parts("ada@example.com", "ada", "s3cret!")
            .expect("valid registration");
        state
            .registration
            .register(registration)
            .await
            .expect("registered");

        let credentials = LoginCredentials::try_from_parts("ada", "s3cret!").expect("credentials");
        let outcome = state.login.login(credentials).await.expect("login");
        let user = state
            .authenticator
            .authenticate(outcome.token.as_str())
            .await
            .expect("token accepted");
        assert_eq!(user.username().as_ref(), "ada");
    }

    #[rstest]
    #[tokio::test]
    async fn calculation_ports_share_one_store() {
        let state = in_memory_state(4).expect("state");
        let created = state
            .calculations
            .create(CalculationInputs::new(10.0, 5.0, "Add"), None)
            .await
            .expect("created");

        let listed = state
            .calculations_query
            .list(PageParams::default())
            .await
            .expect("listed");
        assert_eq!(listed, vec![created]);
    }
}
