//! End-to-end HTTP scenarios against in-memory repositories.
//!
//! Real bcrypt (at the minimum cost) and real JWT signing are used so the
//! register, login and bearer flows run exactly as in production; only the
//! stores are swapped for the `test-support` in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use calculator::Trace;
use calculator::domain::{AccountService, CalculationService, UserId};
use calculator::inbound::http::api_routes;
use calculator::inbound::http::state::HttpState;
use calculator::inbound::http::validation::{json_config, path_config, query_config};
use calculator::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService};
use calculator::test_support::{InMemoryCalculationRepository, InMemoryUserRepository};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    state: HttpState,
    users: Arc<InMemoryUserRepository>,
    calculations: Arc<InMemoryCalculationRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let calculations = Arc::new(InMemoryCalculationRepository::new());
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(BcryptPasswordHasher::new(4).expect("valid cost")),
        Arc::new(JwtTokenService::new(
            &JwtSecret::new("lifecycle-secret"),
            Duration::from_secs(60),
            Arc::new(mockable::DefaultClock),
        )),
    ));
    let service = Arc::new(CalculationService::new(calculations.clone()));
    Harness {
        state: HttpState {
            registration: accounts.clone(),
            login: accounts.clone(),
            authenticator: accounts,
            calculations: service.clone(),
            calculations_query: service,
        },
        users,
        calculations,
    }
}

async fn app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .wrap(Trace)
            .configure(api_routes),
    )
    .await
}

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

async fn register_and_login<S>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, _) = send(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "ada@example.com",
            "username": "ada",
            "password": "s3cret!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({"usernameOrEmail": "ada@example.com", "password": "s3cret!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["accessToken"]
        .as_str()
        .expect("token in login response")
        .to_owned()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[rstest]
#[actix_web::test]
async fn registration_rejects_duplicates_and_hides_the_hash(harness: Harness) {
    let app = app(harness.state).await;
    let payload = json!({"email": "ada@example.com", "username": "ada", "password": "s3cret!"});

    let (status, user) = send(
        &app,
        test::TestRequest::post().uri("/users/register").set_json(&payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["isActive"], true);
    assert!(user.get("passwordHash").is_none());
    let stored = harness
        .users
        .password_hash_of("ada")
        .expect("stored hash");
    assert_ne!(stored, "s3cret!");

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/users/register").set_json(&payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "duplicate_email");

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "other@example.com",
            "username": "ada",
            "password": "s3cret!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "duplicate_username");
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorized(harness: Harness) {
    let app = app(harness.state).await;
    register_and_login(&app).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({"username_or_email": "ada", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn calculation_history_lifecycle(harness: Harness) {
    let app = app(harness.state).await;
    let token = register_and_login(&app).await;

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/calculations")
            .insert_header(bearer(&token))
            .set_json(json!({"a": 10, "b": 5, "type": "Add"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["result"], 15.0);
    let id = created["id"].as_i64().expect("numeric id");
    let owner = created["userId"].as_str().expect("owner recorded");
    assert!(UserId::new(owner).is_ok());

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/calculations/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"a": 20, "b": 4, "type": "Multiply"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["result"], 80.0);
    assert_eq!(updated["type"], "Multiply");

    let (status, listed) = send(
        &app,
        test::TestRequest::get()
            .uri("/calculations")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/calculations/{id}"))
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(harness.calculations.is_empty());

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/calculations/{id}"))
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn failed_computations_are_never_stored(harness: Harness) {
    let app = app(harness.state).await;
    let token = register_and_login(&app).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/calculations")
            .insert_header(bearer(&token))
            .set_json(json!({"a": 10, "b": 0, "type": "Divide"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["code"], "division_by_zero");

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/calculations")
            .insert_header(bearer(&token))
            .set_json(json!({"a": 1, "b": 2, "type": "Power"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["code"], "unsupported_operation");
    assert!(harness.calculations.is_empty());
}

#[rstest]
#[actix_web::test]
async fn deactivated_accounts_are_forbidden(harness: Harness) {
    let app = app(harness.state).await;
    let token = register_and_login(&app).await;

    let (_, me) = send(
        &app,
        test::TestRequest::get()
            .uri("/users/me")
            .insert_header(bearer(&token)),
    )
    .await;
    let id = UserId::new(me["id"].as_str().expect("user id")).expect("valid id");
    assert!(harness.users.set_active(&id, false));

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/calculations")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[actix_web::test]
async fn arithmetic_needs_no_token(harness: Harness) {
    let app = app(harness.state).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/divide")
            .set_json(json!({"a": 9, "b": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 3.0);

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/divide")
            .set_json(json!({"a": 9, "b": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["code"], "division_by_zero");
}

#[rstest]
#[case("ADA")]
#[case("Ada@Example.com")]
#[case("nobody@example.com")]
#[actix_web::test]
async fn login_identifiers_match_exactly(harness: Harness, #[case] identifier: &str) {
    let app = app(harness.state).await;
    register_and_login(&app).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({"usernameOrEmail": identifier, "password": "s3cret!"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Invalid username or password");
}

#[rstest]
#[actix_web::test]
async fn updating_one_calculation_leaves_others_untouched(harness: Harness) {
    let app = app(harness.state).await;
    let token = register_and_login(&app).await;

    let mut ids = Vec::new();
    for payload in [
        json!({"a": 1, "b": 2, "type": "Add"}),
        json!({"a": 6, "b": 3, "type": "Divide"}),
    ] {
        let (status, created) = send(
            &app,
            test::TestRequest::post()
                .uri("/calculations")
                .insert_header(bearer(&token))
                .set_json(payload),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_i64().expect("numeric id"));
    }
    let (edited, untouched) = (ids[0], ids[1]);

    let (_, before) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/calculations/{untouched}"))
            .insert_header(bearer(&token)),
    )
    .await;

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/calculations/{edited}"))
            .insert_header(bearer(&token))
            .set_json(json!({"a": 7, "b": 7, "type": "Multiply"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["result"], 49.0);

    let (status, after) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/calculations/{untouched}"))
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
    assert_eq!(after["result"], 2.0);
}

#[rstest]
#[actix_web::test]
async fn deleting_twice_reports_not_found(harness: Harness) {
    let app = app(harness.state).await;
    let token = register_and_login(&app).await;

    let (_, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/calculations")
            .insert_header(bearer(&token))
            .set_json(json!({"a": 4, "b": 1, "type": "Subtract"})),
    )
    .await;
    let uri = format!("/calculations/{}", created["id"].as_i64().expect("numeric id"));

    let (status, _) = send(
        &app,
        test::TestRequest::delete().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        test::TestRequest::delete().uri(&uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}
