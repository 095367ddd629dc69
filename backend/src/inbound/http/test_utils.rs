//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MockBearerAuthenticator, MockCalculationCommand, MockCalculationQuery, MockLoginService,
    MockRegistrationService,
};
use crate::domain::{EmailAddress, User, UserId, Username};

use super::state::HttpState;
use super::validation::{json_config, path_config, query_config};

pub const VALID_TOKEN: &str = "valid-token";
pub const SAMPLE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// One mock per driving port. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub authenticator: MockBearerAuthenticator,
    pub calculations: MockCalculationCommand,
    pub calculations_query: MockCalculationQuery,
}

impl MockPorts {
    /// Accept [`VALID_TOKEN`] as [`sample_user`], any number of times.
    pub fn with_authenticated_caller(mut self) -> Self {
        self.authenticator
            .expect_authenticate()
            .withf(|token| token == VALID_TOKEN)
            .returning(|_| Ok(sample_user()));
        self
    }

    pub fn into_state(self) -> HttpState {
        use std::sync::Arc;

        HttpState {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            authenticator: Arc::new(self.authenticator),
            calculations: Arc::new(self.calculations),
            calculations_query: Arc::new(self.calculations_query),
        }
    }
}

pub fn sample_user() -> User {
    User::new(
        UserId::new(SAMPLE_USER_ID).expect("fixture id"),
        EmailAddress::new("ada@example.com").expect("fixture email"),
        Username::new("ada").expect("fixture username"),
        true,
        DateTime::<Utc>::UNIX_EPOCH,
    )
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {VALID_TOKEN}"))
}

/// App wired like production: state plus the extractor configs.
pub fn test_app(
    ports: MockPorts,
    routes: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(routes)
}
