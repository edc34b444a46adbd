//! Query handlers for the Conference & Reviewer Pool context.
//!
//! This module contains query handlers that reconstitute aggregates
//! from stored events and return read-only view DTOs.

use chrono::NaiveDate;
use confreview_core::authorization::Role;
use confreview_core::directory::{UserDirectory, UserIdentity};
use confreview_core::error::DomainError;
use confreview_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::Conference;
use crate::domain::events::CONFERENCE_CREATED_EVENT_TYPE;

/// Read-only view of a conference aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceView {
    /// The conference identifier.
    pub conference_id: Uuid,
    /// The organizing user.
    pub organizer_id: Uuid,
    /// Conference name.
    pub name: String,
    /// Conference location.
    pub location: String,
    /// Optional description.
    pub description: Option<String>,
    /// First day of the conference.
    pub start_date: NaiveDate,
    /// Last day of the conference.
    pub end_date: NaiveDate,
    /// Reviewer pool, in pool order.
    pub reviewer_ids: Vec<Uuid>,
    /// Current version (event count).
    pub version: i64,
}

impl ConferenceView {
    /// Builds a view of `conference`, or `None` if it was never created.
    #[must_use]
    pub fn from_aggregate(conference: &Conference) -> Option<Self> {
        let organizer_id = conference.organizer_id()?;
        let details = conference.details()?;
        Some(Self {
            conference_id: conference.id,
            organizer_id,
            name: details.name.clone(),
            location: details.location.clone(),
            description: details.description.clone(),
            start_date: details.start_date,
            end_date: details.end_date,
            reviewer_ids: conference.reviewer_ids().to_vec(),
            version: conference.version,
        })
    }
}

/// Retrieves an active conference by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the ID does not name a
/// conference stream or the conference has been deleted.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_conference_by_id(
    conference_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<ConferenceView, DomainError> {
    let conference = command_handlers::load_conference(conference_id, repo).await?;
    if !conference.is_active() {
        return Err(DomainError::AggregateNotFound(conference_id));
    }
    ConferenceView::from_aggregate(&conference).ok_or(DomainError::AggregateNotFound(conference_id))
}

/// Lists all active conferences ordered by start date, then name.
///
/// # Errors
///
/// Returns any error from loading or deserializing events.
pub async fn list_conferences(
    repo: &dyn EventRepository,
) -> Result<Vec<ConferenceView>, DomainError> {
    let created = repo
        .load_events_by_type(CONFERENCE_CREATED_EVENT_TYPE)
        .await?;

    let mut views = Vec::with_capacity(created.len());
    for event in &created {
        let conference = command_handlers::load_conference(event.aggregate_id, repo).await?;
        if !conference.is_active() {
            continue;
        }
        if let Some(view) = ConferenceView::from_aggregate(&conference) {
            views.push(view);
        }
    }
    views.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(views)
}

/// Lists every user eligible to be placed in a reviewer pool.
///
/// # Errors
///
/// Returns any error from the user directory.
pub async fn list_reviewer_candidates(
    directory: &dyn UserDirectory,
) -> Result<Vec<UserIdentity>, DomainError> {
    directory.list_users_with_role(Role::Reviewer).await
}
