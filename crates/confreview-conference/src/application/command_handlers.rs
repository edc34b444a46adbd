//! Command handlers for the Conference & Reviewer Pool context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use confreview_core::aggregate::AggregateRoot;
use confreview_core::clock::Clock;
use confreview_core::directory::UserDirectory;
use confreview_core::error::DomainError;
use confreview_core::event::DomainEvent;
use confreview_core::repository::{EventRepository, StoredEvent};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::query_handlers::ConferenceView;
use crate::domain::aggregates::Conference;
use crate::domain::commands::{
    AssignReviewers, CreateConference, DeleteConference, UpdateConference,
};
use crate::domain::events::{CONFERENCE_CREATED_EVENT_TYPE, ConferenceEvent, ConferenceEventKind};
use crate::domain::reviewer_pool::eligible_reviewers;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ConferenceCommandResult {
    /// The aggregate ID affected or created by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
    /// The conference state after the command.
    pub conference: ConferenceView,
}

fn to_stored_event(event: &ConferenceEvent) -> StoredEvent {
    let meta = event.metadata();
    StoredEvent {
        event_id: meta.event_id,
        aggregate_id: meta.aggregate_id,
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number: meta.sequence_number,
        correlation_id: meta.correlation_id,
        causation_id: meta.causation_id,
        occurred_at: meta.occurred_at,
    }
}

/// Reconstitutes a `Conference` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    conference_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Conference, DomainError> {
    let mut conference = Conference::new(conference_id);
    for stored in existing_events {
        let kind: ConferenceEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = ConferenceEvent {
            metadata: confreview_core::event::EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        };
        conference.apply(&event);
    }
    Ok(conference)
}

/// Loads an existing conference stream.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the stream is empty or is not
/// a conference stream, or any error from loading and deserializing events.
pub(crate) async fn load_conference(
    conference_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Conference, DomainError> {
    let existing_events = repo.load_events(conference_id).await?;
    match existing_events.first() {
        Some(first) if first.event_type == CONFERENCE_CREATED_EVENT_TYPE => {}
        _ => return Err(DomainError::AggregateNotFound(conference_id)),
    }
    reconstitute(conference_id, &existing_events)
}

/// Persists the uncommitted events of `conference` and folds them into its
/// state.
async fn commit(
    conference: &mut Conference,
    repo: &dyn EventRepository,
) -> Result<ConferenceCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = conference
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    repo.append_events(conference.id, conference.version(), &stored_events)
        .await?;

    for event in conference.uncommitted_events().to_vec() {
        conference.apply(&event);
    }
    conference.clear_uncommitted_events();

    let view = ConferenceView::from_aggregate(conference)
        .ok_or(DomainError::AggregateNotFound(conference.id))?;

    Ok(ConferenceCommandResult {
        aggregate_id: conference.id,
        stored_events,
        conference: view,
    })
}

/// Handles the `CreateConference` command: creates a new aggregate owned by
/// the acting organizer and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the actor is not an organizer,
/// `DomainError::Validation` for invalid details, or any persistence error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_create_conference(
    command: &CreateConference,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ConferenceCommandResult, DomainError> {
    let conference_id = Uuid::new_v4();
    let mut conference = Conference::new(conference_id);

    conference.create(
        &command.actor,
        command.details.clone(),
        command.correlation_id,
        clock,
    )?;

    let result = commit(&mut conference, repo).await?;
    info!(%conference_id, organizer_id = %command.actor.user_id, "conference created");
    Ok(result)
}

/// Handles the `UpdateConference` command: reconstitutes the aggregate,
/// replaces its details, and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the conference does not exist,
/// `DomainError::Unauthorized` if the actor is not its organizer,
/// `DomainError::Validation` for invalid details, or any persistence error.
#[instrument(
    skip_all,
    fields(
        conference_id = %command.conference_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_update_conference(
    command: &UpdateConference,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ConferenceCommandResult, DomainError> {
    let mut conference = load_conference(command.conference_id, repo).await?;

    conference.update(
        &command.actor,
        command.details.clone(),
        command.correlation_id,
        clock,
    )?;

    commit(&mut conference, repo).await
}

/// Handles the `DeleteConference` command.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the conference does not exist
/// or is already deleted, `DomainError::Unauthorized` if the actor is not its
/// organizer, or any persistence error.
#[instrument(
    skip_all,
    fields(
        conference_id = %command.conference_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_delete_conference(
    command: &DeleteConference,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ConferenceCommandResult, DomainError> {
    let mut conference = load_conference(command.conference_id, repo).await?;

    conference.delete(&command.actor, command.correlation_id, clock)?;

    let result = commit(&mut conference, repo).await?;
    info!(conference_id = %command.conference_id, "conference deleted");
    Ok(result)
}

/// Handles the `AssignReviewers` command: resolves the requested ids against
/// the user directory, keeps only reviewers, and replaces the pool.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the conference does not exist,
/// `DomainError::Unauthorized` if the actor is not its organizer, or any
/// directory or persistence error.
#[instrument(
    skip_all,
    fields(
        conference_id = %command.conference_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_assign_reviewers(
    command: &AssignReviewers,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    directory: &dyn UserDirectory,
) -> Result<ConferenceCommandResult, DomainError> {
    let mut conference = load_conference(command.conference_id, repo).await?;

    let candidates = directory.find_users(&command.reviewer_ids).await?;
    let pool = eligible_reviewers(&candidates);
    if pool.len() < command.reviewer_ids.len() {
        warn!(
            conference_id = %command.conference_id,
            requested = command.reviewer_ids.len(),
            kept = pool.len(),
            "dropped ids that are not reviewers"
        );
    }

    conference.assign_reviewers(&command.actor, pool, command.correlation_id, clock)?;

    commit(&mut conference, repo).await
}
