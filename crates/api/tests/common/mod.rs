#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use staffhub_api::auth::jwt::JwtConfig;
use staffhub_api::auth::provider::{Credentials, StaticAuthProvider};
use staffhub_api::config::{LogFormat, ServerConfig};
use staffhub_api::router::build_app_router;
use staffhub_api::state::AppState;
use staffhub_db::memory::{MemoryEmployeeStore, MemoryProjectStore};

pub const ADMIN: (&str, &str) = ("admin", "admin-pass");
pub const USER: (&str, &str) = ("user", "user-pass");

/// Build a test `ServerConfig` with safe defaults.
///
/// Store URLs are never dialled: the test app runs over in-memory stores.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        mongodb_uri: "mongodb://unused".to_string(),
        mongodb_database: "staffhub_test".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 15,
        },
        admin: Credentials {
            username: ADMIN.0.to_string(),
            password: ADMIN.1.to_string(),
        },
        user: Credentials {
            username: USER.0.to_string(),
            password: USER.1.to_string(),
        },
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over fresh in-memory stores.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    let auth = StaticAuthProvider::new(&config.admin, &config.user).unwrap();
    let state = AppState::new(
        Arc::new(MemoryEmployeeStore::new()),
        Arc::new(MemoryProjectStore::new()),
        Arc::new(auth),
        config.clone(),
    );
    build_app_router(state, &config)
}

pub fn basic(credentials: (&str, &str)) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", credentials.0, credentials.1))
    )
}

pub fn admin() -> Option<String> {
    Some(basic(ADMIN))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, auth: Option<String>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match auth {
        Some(value) => builder.header(AUTHORIZATION, value),
        None => builder,
    }
}

/// Send a request with no body.
pub async fn call(app: &Router, method: Method, uri: &str, auth: Option<String>) -> Response<Body> {
    send(app, builder(method, uri, auth).body(Body::empty()).unwrap()).await
}

pub async fn get(app: &Router, uri: &str, auth: Option<String>) -> Response<Body> {
    call(app, Method::GET, uri, auth).await
}

/// Send a JSON body.
pub async fn json(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<String>,
    body: Value,
) -> Response<Body> {
    let request = builder(method, uri, auth)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send a URL-encoded form body, as a browser would.
pub async fn form(
    app: &Router,
    uri: &str,
    auth: Option<String>,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let request = builder(Method::POST, uri, auth)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create an employee through the API and return its JSON representation.
pub async fn create_employee(app: &Router, name: &str, title: &str, salary: f64, email: &str) -> Value {
    let response = json(
        app,
        Method::POST,
        "/api/employees",
        admin(),
        serde_json::json!({ "name": name, "title": title, "salary": salary, "email": email }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "seeding employee {email}");
    body_json(response).await["data"].clone()
}

/// Create a project through the API and return its JSON representation.
pub async fn create_project(app: &Router, body: Value) -> Value {
    let response = json(app, Method::POST, "/api/projects", None, body).await;
    assert_eq!(response.status(), StatusCode::OK, "seeding project");
    body_json(response).await["data"].clone()
}
