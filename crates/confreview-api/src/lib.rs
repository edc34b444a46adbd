//! Confreview: HTTP API server library.
//!
//! Exposes the router so the binary and the integration tests build the
//! exact same application.

pub mod actor;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/conferences", routes::conferences::router())
        .nest("/api/v1/papers", routes::papers::router())
        .nest("/api/v1/reviews", routes::reviews::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
