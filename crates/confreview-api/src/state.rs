//! Shared application state.

use std::sync::Arc;

use confreview_core::clock::Clock;
use confreview_core::directory::UserDirectory;
use confreview_core::repository::EventRepository;
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Source of event timestamps.
    pub clock: Arc<dyn Clock>,
    /// Event store for every aggregate stream.
    pub event_repository: Arc<dyn EventRepository>,
    /// Read access to user identities and roles.
    pub user_directory: Arc<dyn UserDirectory>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        db_pool: PgPool,
        clock: Arc<dyn Clock>,
        event_repository: Arc<dyn EventRepository>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            db_pool,
            clock,
            event_repository,
            user_directory,
        }
    }
}
