//! Test repositories: mock `EventRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use confreview_core::error::DomainError;
use confreview_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// An event repository that records all `append_events` calls. Returns the
/// configured events from `load_events` on every call (regardless of the
/// requested aggregate) and always succeeds on `append_events`.
#[derive(Debug)]
pub struct RecordingEventRepository {
    load_result: Mutex<Vec<StoredEvent>>,
    appended: Mutex<Vec<(Uuid, i64, Vec<StoredEvent>)>>,
}

impl RecordingEventRepository {
    /// Create a new recording repository that will return `load_result` from
    /// every `load_events` call.
    ///
    /// # Panics
    ///
    /// Panics if `load_result` is an `Err`: use `FailingEventRepository` for
    /// error scenarios.
    #[must_use]
    pub fn new(load_result: Result<Vec<StoredEvent>, DomainError>) -> Self {
        Self {
            load_result: Mutex::new(load_result.expect(
                "RecordingEventRepository::new does not accept Err; use FailingEventRepository",
            )),
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all events that were appended.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<(Uuid, i64, Vec<StoredEvent>)> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.load_result.lock().unwrap().clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }

    async fn load_events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self
            .load_result
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect())
    }
}

/// An event repository that always returns an empty event list and silently
/// accepts appends. Useful for testing "aggregate not found" scenarios.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn load_events_by_type(&self, _event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }
}

/// An event repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_events_by_type(&self, _event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A fully functional in-memory event store with the same optimistic
/// concurrency semantics as the PostgreSQL repository. Used by tests that
/// drive an aggregate through several commands.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of events stored for `aggregate_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stream_len(&self, aggregate_id: Uuid) -> usize {
        self.streams
            .lock()
            .unwrap()
            .get(&aggregate_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self
            .streams
            .lock()
            .unwrap()
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default())
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
        let mut streams = self.streams.lock().unwrap();
        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |e| e.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);
        Ok(())
    }

    async fn load_events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.lock().unwrap();
        let mut events: Vec<StoredEvent> = streams
            .values()
            .flatten()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.occurred_at, e.aggregate_id, e.sequence_number));
        Ok(events)
    }
}
