//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every handler's `utoipa::path` and the shared
//! schemas, and registers the `BearerAuth` scheme used by the account and
//! calculation routes. Swagger UI serves it in debug builds; the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Calculation, Error, ErrorCode, User};
use crate::inbound::http::arithmetic::{OperandsRequest, ResultResponse, TaggedOperandsRequest};
use crate::inbound::http::calculations::CalculationRequest;
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest, TokenResponse};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /users/login or /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Calculator API",
        description = "Arithmetic endpoints, user accounts and a token-protected calculation history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::login_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::auth_register,
        crate::inbound::http::users::auth_login,
        crate::inbound::http::calculations::create_calculation,
        crate::inbound::http::calculations::list_calculations,
        crate::inbound::http::calculations::get_calculation,
        crate::inbound::http::calculations::update_calculation,
        crate::inbound::http::calculations::delete_calculation,
        crate::inbound::http::arithmetic::add,
        crate::inbound::http::arithmetic::subtract,
        crate::inbound::http::arithmetic::multiply,
        crate::inbound::http::arithmetic::divide,
        crate::inbound::http::arithmetic::compute_tagged,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Calculation,
        CalculationRequest,
        Error,
        ErrorCode,
        LoginRequest,
        LoginResponse,
        OperandsRequest,
        RegisterRequest,
        ResultResponse,
        TaggedOperandsRequest,
        TokenResponse,
        User,
    )),
    tags(
        (name = "users", description = "Account registration and login"),
        (name = "auth", description = "Token-only account flows"),
        (name = "calculations", description = "Stored calculation history"),
        (name = "arithmetic", description = "Stateless arithmetic"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths, schemas and security.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_properties(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("User", &["id", "email", "username", "isActive", "createdAt"])]
    #[case("Calculation", &["id", "a", "b", "type", "result", "userId"])]
    #[case("LoginRequest", &["usernameOrEmail", "password"])]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let properties = schema_properties(name);
        for field in fields {
            assert!(
                properties.iter().any(|p| p == field),
                "{name} should have field '{field}', has {properties:?}"
            );
        }
    }

    #[rstest]
    fn user_schema_never_mentions_the_password_hash() {
        let properties = schema_properties("User");
        assert!(properties.iter().all(|p| !p.to_lowercase().contains("password")));
    }

    #[rstest]
    #[case("/users/register")]
    #[case("/users/login")]
    #[case("/calculations")]
    #[case("/calculations/{id}")]
    #[case("/add")]
    #[case("/compute")]
    #[case("/health/ready")]
    fn routes_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
