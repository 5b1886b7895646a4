#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    middleware::Logger,
    test, App,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use taskvault::{config::AuthConfig, recover::CatchPanic, routes, store, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_BCRYPT_COST: u32 = 4;

/// Builds the full application on a fresh in-memory database.
pub async fn spawn_app() -> (
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    SqlitePool,
) {
    let pool = store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    store::migrate(&pool).await.expect("Failed to migrate");

    let state = AppState::new(pool.clone(), &AuthConfig::new(TEST_SECRET, TEST_BCRYPT_COST));
    let app = test::init_service(
        App::new()
            .wrap(CatchPanic)
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &state)),
    )
    .await;

    (app, pool)
}

/// Sends `req` and returns the status with the body parsed as JSON.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, json)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers and logs in `username`, returning the access token.
pub async fn token_for<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, username, password).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub async fn create_task<S, B>(app: &S, token: &str, payload: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(token))
        .set_json(payload)
        .to_request();
    send(app, req).await
}

pub async fn list_tasks<S, B>(app: &S, token: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(token))
        .to_request();
    send(app, req).await
}

pub async fn toggle_task<S, B>(app: &S, token: &str, id: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}/toggle", id))
        .insert_header(bearer(token))
        .to_request();
    send(app, req).await
}
