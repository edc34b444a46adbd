//! Domain events for the Conference & Reviewer Pool context.

use chrono::NaiveDate;
use confreview_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when an organizer creates a conference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConferenceCreated {
    /// The conference identifier.
    pub conference_id: Uuid,
    /// The organizing user.
    pub organizer_id: Uuid,
    /// Conference name.
    pub name: String,
    /// Conference location.
    pub location: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// First day of the conference.
    pub start_date: NaiveDate,
    /// Last day of the conference.
    pub end_date: NaiveDate,
}

/// Emitted when the organizer edits a conference's details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConferenceUpdated {
    /// The conference identifier.
    pub conference_id: Uuid,
    /// Conference name.
    pub name: String,
    /// Conference location.
    pub location: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// First day of the conference.
    pub start_date: NaiveDate,
    /// Last day of the conference.
    pub end_date: NaiveDate,
}

/// Emitted when the reviewer pool is replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerPoolAssigned {
    /// The conference identifier.
    pub conference_id: Uuid,
    /// The complete new pool, in pool order.
    pub reviewer_ids: Vec<Uuid>,
}

/// Emitted when the organizer deletes a conference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConferenceDeleted {
    /// The conference identifier.
    pub conference_id: Uuid,
}

/// Event type identifier for [`ConferenceCreated`].
pub const CONFERENCE_CREATED_EVENT_TYPE: &str = "conference.created";

/// Event type identifier for [`ConferenceUpdated`].
pub const CONFERENCE_UPDATED_EVENT_TYPE: &str = "conference.updated";

/// Event type identifier for [`ReviewerPoolAssigned`].
pub const REVIEWER_POOL_ASSIGNED_EVENT_TYPE: &str = "conference.reviewer_pool_assigned";

/// Event type identifier for [`ConferenceDeleted`].
pub const CONFERENCE_DELETED_EVENT_TYPE: &str = "conference.deleted";

/// Event payload variants for the Conference & Reviewer Pool context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConferenceEventKind {
    /// A conference has been created.
    ConferenceCreated(ConferenceCreated),
    /// A conference's details have been edited.
    ConferenceUpdated(ConferenceUpdated),
    /// The reviewer pool has been replaced.
    ReviewerPoolAssigned(ReviewerPoolAssigned),
    /// A conference has been deleted.
    ConferenceDeleted(ConferenceDeleted),
}

/// Domain event envelope for the Conference & Reviewer Pool context.
#[derive(Debug, Clone)]
pub struct ConferenceEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ConferenceEventKind,
}

impl DomainEvent for ConferenceEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ConferenceEventKind::ConferenceCreated(_) => CONFERENCE_CREATED_EVENT_TYPE,
            ConferenceEventKind::ConferenceUpdated(_) => CONFERENCE_UPDATED_EVENT_TYPE,
            ConferenceEventKind::ReviewerPoolAssigned(_) => REVIEWER_POOL_ASSIGNED_EVENT_TYPE,
            ConferenceEventKind::ConferenceDeleted(_) => CONFERENCE_DELETED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ConferenceEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
