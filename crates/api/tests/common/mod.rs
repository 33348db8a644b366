#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use wiki_api::config::{Environment, ServerConfig};
use wiki_api::router::build_app_router;
use wiki_api::state::AppState;
use wiki_db::schema::{provision, SeedData};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Test,
        database_url: None,
        request_timeout_secs: 30,
    }
}

/// Provision and seed the given pool, then build the full application
/// router on top of it.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub async fn build_test_app(pool: SqlitePool) -> Router {
    provision(&pool, SeedData::Include)
        .await
        .expect("provisioning test database");

    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a URL-encoded form with the given method.
pub async fn send_form(app: Router, method: Method, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    send_form(app, Method::POST, uri, form).await
}

pub async fn put_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    send_form(app, Method::PUT, uri, form).await
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
