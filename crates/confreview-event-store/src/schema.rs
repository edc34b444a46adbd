//! Database schema for the event store and user directory.
//!
//! The same statements live in `migrations/`; these constants let tools and
//! tests create the tables without running the migrator.

/// SQL to create the events table.
pub const CREATE_EVENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS domain_events (
    event_id        UUID PRIMARY KEY,
    aggregate_id    UUID NOT NULL,
    event_type      VARCHAR(255) NOT NULL,
    payload         JSONB NOT NULL,
    sequence_number BIGINT NOT NULL,
    correlation_id  UUID NOT NULL,
    causation_id    UUID NOT NULL,
    occurred_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (aggregate_id, sequence_number)
);

CREATE INDEX IF NOT EXISTS idx_domain_events_aggregate_id
    ON domain_events (aggregate_id, sequence_number);

CREATE INDEX IF NOT EXISTS idx_domain_events_correlation_id
    ON domain_events (correlation_id);

CREATE INDEX IF NOT EXISTS idx_domain_events_event_type
    ON domain_events (event_type, occurred_at);
";

/// SQL to create the read-only user directory table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id    UUID PRIMARY KEY,
    name  VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    role  VARCHAR(32) NOT NULL CHECK (role IN ('author', 'reviewer', 'organizer'))
);
";
