//! Confreview: PostgreSQL-backed persistence.
//!
//! Provides the event store used by every bounded context and the read-only
//! user directory backed by the `users` table.

pub mod pg_event_repository;
pub mod pg_user_directory;
pub mod schema;
