//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::{CredentialConfig, ServerConfig};
pub use settings::AppSettings;

use std::future::Future;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::rt::task::JoinHandle;
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use calculator::Trace;
#[cfg(debug_assertions)]
use calculator::doc::ApiDoc;
use calculator::inbound::http::api_routes;
use calculator::inbound::http::health::{HealthState, live, ready};
use calculator::inbound::http::state::HttpState;
use calculator::inbound::http::validation::{json_config, path_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(api_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when the credential adapters cannot be built
/// or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        credentials,
    } = config;
    let http_state = web::Data::new(
        build_http_state(&db_pool, &credentials)
            .map_err(|err| std::io::Error::other(format!("credential setup failed: {err}")))?,
    );

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail the liveness probe once `shutdown` resolves, while Actix drains
/// in-flight requests.
pub fn fail_liveness_on<F>(shutdown: F, health_state: web::Data<HealthState>) -> JoinHandle<()>
where
    F: Future<Output = std::io::Result<()>> + 'static,
{
    actix_web::rt::spawn(async move {
        match shutdown.await {
            Ok(()) => {
                health_state.mark_unhealthy();
                info!("shutdown requested; liveness probe now failing");
            }
            Err(error) => warn!(%error, "cannot listen for shutdown signals"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use calculator::domain::TRACE_ID_HEADER;
    use calculator::outbound::security::JwtSecret;
    use calculator::test_support::{InMemoryCalculationRepository, InMemoryUserRepository};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn in_memory_state() -> web::Data<HttpState> {
        let state = state_builders::build_state_with(
            Arc::new(InMemoryCalculationRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            &CredentialConfig::new(JwtSecret::new("server-test-secret")).with_bcrypt_cost(4),
        )
        .expect("state");
        web::Data::new(state)
    }

    #[rstest]
    #[actix_web::test]
    async fn responses_carry_a_trace_id() {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            in_memory_state(),
        ))
        .await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add")
                .set_json(json!({"a": 2, "b": 3}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(health.clone(), in_memory_state())).await;

        let before = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let after = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_bodies_use_the_error_envelope() {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            in_memory_state(),
        ))
        .await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add")
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert!(body["traceId"].is_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn shutdown_fails_liveness() {
        let health = web::Data::new(HealthState::new());

        fail_liveness_on(async { Ok(()) }, health.clone())
            .await
            .expect("watcher task");

        assert!(!health.is_alive());
    }

    #[rstest]
    #[actix_web::test]
    async fn signal_listener_errors_keep_the_server_live() {
        let health = web::Data::new(HealthState::new());

        fail_liveness_on(
            async { Err(std::io::Error::other("signals unavailable")) },
            health.clone(),
        )
        .await
        .expect("watcher task");

        assert!(health.is_alive());
    }
}
