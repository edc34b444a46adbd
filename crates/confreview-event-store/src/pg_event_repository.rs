//! `PostgreSQL` implementation of the `EventRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use confreview_core::error::DomainError;
use confreview_core::repository::{EventRepository, StoredEvent};

/// `PostgreSQL` error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed event repository.
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Creates a new `PgEventRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    event_id: Uuid,
    aggregate_id: Uuid,
    event_type: String,
    payload: serde_json::Value,
    sequence_number: i64,
    correlation_id: Uuid,
    causation_id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl From<EventRow> for StoredEvent {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            aggregate_id: row.aggregate_id,
            event_type: row.event_type,
            payload: row.payload,
            sequence_number: row.sequence_number,
            correlation_id: row.correlation_id,
            causation_id: row.causation_id,
            occurred_at: row.occurred_at,
        }
    }
}

fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("event store error: {e}"))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

const CURRENT_VERSION_SQL: &str =
    "SELECT COALESCE(MAX(sequence_number), 0) FROM domain_events WHERE aggregate_id = $1";

async fn current_version<'e, E>(executor: E, aggregate_id: Uuid) -> Result<i64, DomainError>
where
    E: sqlx::PgExecutor<'e>,
{
    let (version,): (i64,) = sqlx::query_as(CURRENT_VERSION_SQL)
        .bind(aggregate_id)
        .fetch_one(executor)
        .await
        .map_err(|e| infrastructure(&e))?;
    Ok(version)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT event_id, aggregate_id, event_type, payload, sequence_number, \
                    correlation_id, causation_id, occurred_at \
             FROM domain_events \
             WHERE aggregate_id = $1 \
             ORDER BY sequence_number",
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        Ok(rows.into_iter().map(StoredEvent::from).collect())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(|e| infrastructure(&e))?;

        let actual = current_version(&mut *tx, aggregate_id).await?;
        if actual != expected_version {
            warn!(%aggregate_id, expected_version, actual, "stale append rejected");
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        for event in events {
            let inserted = sqlx::query(
                "INSERT INTO domain_events \
                    (event_id, aggregate_id, event_type, payload, sequence_number, \
                     correlation_id, causation_id, occurred_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(event.event_id)
            .bind(aggregate_id)
            .bind(&event.event_type)
            .bind(&event.payload)
            .bind(event.sequence_number)
            .bind(event.correlation_id)
            .bind(event.causation_id)
            .bind(event.occurred_at)
            .execute(&mut *tx)
            .await;

            if let Err(e) = inserted {
                if is_unique_violation(&e) {
                    // A concurrent writer committed between the version check
                    // and this insert.
                    drop(tx);
                    let actual = current_version(&self.pool, aggregate_id).await?;
                    warn!(%aggregate_id, expected_version, actual, "concurrent append rejected");
                    return Err(DomainError::ConcurrencyConflict {
                        aggregate_id,
                        expected: expected_version,
                        actual,
                    });
                }
                return Err(infrastructure(&e));
            }
        }

        tx.commit().await.map_err(|e| infrastructure(&e))?;
        debug!(%aggregate_id, count = events.len(), "events appended");
        Ok(())
    }

    async fn load_events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT event_id, aggregate_id, event_type, payload, sequence_number, \
                    correlation_id, causation_id, occurred_at \
             FROM domain_events \
             WHERE event_type = $1 \
             ORDER BY occurred_at, aggregate_id, sequence_number",
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        Ok(rows.into_iter().map(StoredEvent::from).collect())
    }
}
