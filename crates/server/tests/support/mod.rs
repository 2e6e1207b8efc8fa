#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::Service;

pub const PASSWORD: &str = "S3curePass!";

fn test_config() -> anyhow::Result<configs::AppConfig> {
    let mut cfg = configs::AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.database.max_connections = 1;
    cfg.database.min_connections = 1;
    cfg.auth.token_secret = "test-secret".into();
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Router over a fresh migrated in-memory SQLite database.
pub async fn build_app() -> anyhow::Result<Router> {
    Ok(server::build_app(&test_config()?).await?)
}

/// Like [`build_app`], also handing back the pool so tests can edit rows directly.
pub async fn build_app_with_db() -> anyhow::Result<(Router, DatabaseConnection)> {
    let state = server::build_state(&test_config()?).await?;
    let db = state.db.clone();
    Ok((server::app_for_state(state), db))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok(TestResponse { status, headers, body })
}

pub async fn sign_up(app: &Router, name: &str, email: &str, role: &str) -> anyhow::Result<TestResponse> {
    send(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": PASSWORD,
            "password_confirm": PASSWORD,
            "role": role,
        })),
    )
    .await
}

pub async fn sign_in(app: &Router, email: &str) -> anyhow::Result<TestResponse> {
    send(app, "POST", "/api/auth/signin", None, Some(json!({ "email": email, "password": PASSWORD }))).await
}

/// Sign up and sign in; returns the bearer token.
pub async fn user_token(app: &Router, name: &str, email: &str, role: &str) -> anyhow::Result<String> {
    let resp = sign_up(app, name, email, role).await?;
    assert_eq!(resp.status, StatusCode::CREATED, "signup failed: {}", resp.body);
    let resp = sign_in(app, email).await?;
    assert_eq!(resp.status, StatusCode::OK, "signin failed: {}", resp.body);
    resp.body["token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("no token in {}", resp.body))
}

pub async fn create_item(app: &Router, token: &str, name: &str, price: f64) -> anyhow::Result<i64> {
    let resp = send(app, "POST", "/api/items", Some(token), Some(json!({ "name": name, "price": price }))).await?;
    assert_eq!(resp.status, StatusCode::OK, "create item failed: {}", resp.body);
    resp.body["item"]["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no item id in {}", resp.body))
}
