//! Confreview API server entry point.

use std::sync::Arc;

use confreview_api::config::ApiConfig;
use confreview_api::error::AppError;
use confreview_api::state::AppState;
use confreview_api::{app, telemetry};
use confreview_core::clock::SystemClock;
use confreview_event_store::pg_event_repository::PgEventRepository;
use confreview_event_store::pg_user_directory::PgUserDirectory;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;

/// Resolves on SIGINT or SIGTERM. A handler that cannot be installed never
/// fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ApiConfig::from_env()?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!(service = %config.service_name, "Starting Confreview API server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    // Build application state.
    let app_state = AppState::new(
        pool.clone(),
        Arc::new(SystemClock),
        Arc::new(PgEventRepository::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool)),
    );

    // Start server.
    let addr = config.listen_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped, flushing spans");
    telemetry.shutdown();
    Ok(())
}
