//! Shared helpers for the rental-service integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::config::AppConfig;
use rental_service::db::Session;
use rental_service::{create_router, AppState, SERVICE_NAME};
use serde_json::{json, Value};
use sqlx::Row;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// A database path whose directory does not exist, so every connect fails.
pub const UNREACHABLE_URL: &str = "sqlite:///nonexistent-dir/house_rental.db";

pub fn test_config(url: &str) -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", url),
        ("JWT_SECRET", SECRET),
        ("DB_MAX_CONNECTIONS", "1"),
        ("DB_CONNECT_TIMEOUT_SECS", "2"),
        // Keep the single in-memory connection (and its data) alive.
        ("DB_IDLE_TIMEOUT_SECS", "0"),
    ]);
    AppConfig::from_lookup(SERVICE_NAME, |key| vars.get(key).map(|v| v.to_string())).unwrap()
}

/// App backed by a fresh in-memory SQLite database with the schema in place.
pub async fn test_app() -> (Router, AppState) {
    let state = AppState::new(test_config("sqlite::memory:")).await.unwrap();
    (create_router(state.clone()), state)
}

/// App whose database can never be reached.
pub async fn unreachable_app() -> (Router, AppState) {
    let state = AppState::new(test_config(UNREACHABLE_URL)).await.unwrap();
    (create_router(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), token).await
}

pub fn tenant(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Jane",
        "last_name": "Doe",
        "phone": "0712345678",
        "identity_number": "ID-12345"
    })
}

pub fn property(city: &str) -> Value {
    json!({
        "property_name": "Garden Flat",
        "address": "12 Elm Street",
        "city": city,
        "property_type": "Apartment",
        "monthly_rent": 1500.0
    })
}

/// Registers a tenant and returns `(tenant_id, token)`.
pub async fn register(app: &Router, email: &str) -> (i64, String) {
    let (status, body) = post(app, "/api/v1/auth/register", tenant(email), None).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    let data = &body["data"];
    (
        data["user_id"].as_i64().unwrap(),
        data["token"].as_str().unwrap().to_string(),
    )
}

/// Creates a property and returns its ID.
pub async fn create_property(app: &Router, token: &str, city: &str) -> i64 {
    let (status, body) = post(app, "/api/v1/properties", property(city), Some(token)).await;
    assert_eq!(status, StatusCode::CREATED, "create property failed: {}", body);
    body["data"]["property_id"].as_i64().unwrap()
}

/// Runs a `SELECT COUNT(*) AS n ...` on its own session.
///
/// The session is dropped before returning so the next request can use the
/// single pooled connection.
pub async fn count(state: &AppState, sql: &str) -> i64 {
    let mut session = Session::open(state.db.clone()).await.unwrap();
    sqlx::query(sql)
        .fetch_one(session.cursor())
        .await
        .unwrap()
        .get::<i64, _>("n")
}

pub async fn execute(state: &AppState, sql: &str) {
    let mut session = Session::open(state.db.clone()).await.unwrap();
    sqlx::query(sql).execute(session.cursor()).await.unwrap();
}

/// Waits until every pooled connection is back in the pool.
pub async fn wait_until_idle(state: &AppState) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let stats = state.db.pool_stats();
            if stats.active == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("connections were not returned to the pool");
}
