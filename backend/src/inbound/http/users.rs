//! Account API handlers: registration, login and the current user.
//!
//! ```text
//! POST /users/register {"email":"ada@example.com","username":"ada","password":"s3cret!"}
//! POST /users/login {"usernameOrEmail":"ada","password":"s3cret!"}
//! GET /users/me            (Authorization: Bearer <token>)
//! POST /auth/register      (same body as /users/register, returns a token)
//! POST /auth/login         (same body as /users/login, returns a token)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::LoginOutcome;
use crate::domain::{BEARER_TOKEN_TYPE, Error, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credential_error;

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "s3cret!", min_length = 6, max_length = 72)]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.username, &value.password)
            .map_err(credential_error)
    }
}

/// Login request body. `username_or_email` is accepted as an alias.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "username_or_email")]
    #[schema(example = "ada")]
    pub username_or_email: String,
    #[schema(example = "s3cret!")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username_or_email, &value.password).map_err(credential_error)
    }
}

/// Signed bearer token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl From<&LoginOutcome> for TokenResponse {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            access_token: outcome.token.as_str().to_owned(),
            token_type: BEARER_TOKEN_TYPE.to_owned(),
        }
    }
}

/// Login result: a token plus the public user fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        let TokenResponse {
            access_token,
            token_type,
        } = TokenResponse::from(&outcome);
        Self {
            message: LOGIN_SUCCESS_MESSAGE.to_owned(),
            access_token,
            token_type,
            user: outcome.user,
        }
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid or duplicate email/username", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/register")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate with an email or username and receive a bearer token.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Account inactive", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "loginUser",
    security([])
)]
#[post("/users/login")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let outcome = state.login.login(credentials).await?;
    Ok(web::Json(LoginResponse::from(outcome)))
}

/// Return the user the bearer token was issued for.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Account inactive", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("BearerAuth" = []))
)]
#[get("/users/me")]
pub async fn current_user(caller: AuthenticatedUser) -> web::Json<User> {
    web::Json(caller.into_inner())
}

/// Create an account and log straight in.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid or duplicate email/username", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "authRegister",
    security([])
)]
#[post("/auth/register")]
pub async fn auth_register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let credentials = LoginCredentials::try_from_parts(
        registration.username().as_ref(),
        registration.password().expose(),
    )
    .map_err(credential_error)?;
    let user = state.registration.register(registration).await?;
    info!(user_id = %user.id(), "issuing token for new account");
    let outcome = state.login.login(credentials).await?;
    Ok(HttpResponse::Created().json(TokenResponse::from(&outcome)))
}

/// Authenticate and receive only the token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Account inactive", body = Error)
    ),
    tags = ["auth"],
    operation_id = "authLogin",
    security([])
)]
#[post("/auth/login")]
pub async fn auth_login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let outcome = state.login.login(credentials).await?;
    Ok(web::Json(TokenResponse::from(&outcome)))
}
