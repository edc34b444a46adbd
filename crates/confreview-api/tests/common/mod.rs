//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use confreview_api::actor::{USER_ID_HEADER, USER_ROLE_HEADER};
use confreview_api::app;
use confreview_api::state::AppState;
use confreview_core::authorization::{Actor, Role};
use confreview_event_store::pg_event_repository::PgEventRepository;
use confreview_event_store::pg_user_directory::PgUserDirectory;
use confreview_test_support::FixedClock;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Build the full app router backed by `PostgreSQL` and a fixed clock. Uses
/// the same router as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::new(
        pool.clone(),
        Arc::new(FixedClock::standard()),
        Arc::new(PgEventRepository::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool)),
    );
    app(app_state)
}

/// Insert a user into the directory table and return it as an actor.
pub async fn insert_user(pool: &PgPool, name: &str, role: Role) -> Actor {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(name)
        .bind(format!("{}@example.org", name.to_lowercase()))
        .bind(role.as_str())
        .execute(pool)
        .await
        .unwrap();
    Actor::new(id, role)
}

/// Send a request as `actor` with an optional JSON body and return the
/// status and JSON response (`Value::Null` for an empty body).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    actor: Actor,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_ID_HEADER, actor.user_id.to_string())
        .header(USER_ROLE_HEADER, actor.role.as_str());
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}
