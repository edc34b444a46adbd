//! Aggregate roots for the Conference & Reviewer Pool context.

use chrono::NaiveDate;
use confreview_core::aggregate::AggregateRoot;
use confreview_core::authorization::{Actor, Role};
use confreview_core::clock::Clock;
use confreview_core::error::DomainError;
use confreview_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    CONFERENCE_CREATED_EVENT_TYPE, CONFERENCE_DELETED_EVENT_TYPE, CONFERENCE_UPDATED_EVENT_TYPE,
    ConferenceCreated, ConferenceDeleted, ConferenceEvent, ConferenceEventKind, ConferenceUpdated,
    REVIEWER_POOL_ASSIGNED_EVENT_TYPE, ReviewerPoolAssigned,
};

/// Editable details of a conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceDetails {
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

impl ConferenceDetails {
    /// Checks required fields and date ordering, returning trimmed details.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name or location is blank or
    /// the end date precedes the start date.
    pub fn validated(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_owned();
        let location = self.location.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::Validation("conference name is required".to_owned()));
        }
        if location.is_empty() {
            return Err(DomainError::Validation(
                "conference location is required".to_owned(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(format!(
                "end date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }
        let description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        Ok(Self {
            name,
            location,
            description,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// The aggregate root for a conference.
#[derive(Debug)]
pub struct Conference {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The organizing user (set after `ConferenceCreated`).
    pub(crate) organizer_id: Option<Uuid>,
    /// Current details (set after `ConferenceCreated`).
    pub(crate) details: Option<ConferenceDetails>,
    /// Reviewer pool in pool order.
    pub(crate) reviewer_ids: Vec<Uuid>,
    /// Whether the conference has been deleted.
    pub(crate) deleted: bool,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<ConferenceEvent>,
}

impl Conference {
    /// Creates a new, not yet created, conference.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            organizer_id: None,
            details: None,
            reviewer_ids: Vec::new(),
            deleted: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the organizing user, if the conference has been created.
    #[must_use]
    pub fn organizer_id(&self) -> Option<Uuid> {
        self.organizer_id
    }

    /// Returns the current details, if the conference has been created.
    #[must_use]
    pub fn details(&self) -> Option<&ConferenceDetails> {
        self.details.as_ref()
    }

    /// Returns the reviewer pool in pool order.
    #[must_use]
    pub fn reviewer_ids(&self) -> &[Uuid] {
        &self.reviewer_ids
    }

    /// Returns `true` if the conference was created and not deleted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.organizer_id.is_some() && !self.deleted
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: ConferenceEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = ConferenceEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Ensures the conference exists and `actor` is its organizer.
    fn require_organizer(&self, actor: &Actor) -> Result<(), DomainError> {
        let Some(organizer_id) = self.organizer_id.filter(|_| !self.deleted) else {
            return Err(DomainError::AggregateNotFound(self.id));
        };
        actor.require_role(Role::Organizer)?;
        actor.require_user(organizer_id, "conference organizer")
    }

    /// Creates the conference, producing a `ConferenceCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the actor is not an organizer,
    /// or `DomainError::Validation` if the details are invalid or the
    /// conference already exists.
    pub fn create(
        &mut self,
        actor: &Actor,
        details: ConferenceDetails,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        actor.require_role(Role::Organizer)?;
        if self.organizer_id.is_some() {
            return Err(DomainError::Validation(format!(
                "conference {} already exists",
                self.id
            )));
        }
        let details = details.validated()?;

        self.record(
            CONFERENCE_CREATED_EVENT_TYPE,
            ConferenceEventKind::ConferenceCreated(ConferenceCreated {
                conference_id: self.id,
                organizer_id: actor.user_id,
                name: details.name,
                location: details.location,
                description: details.description,
                start_date: details.start_date,
                end_date: details.end_date,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Replaces the conference details, producing a `ConferenceUpdated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the conference does not
    /// exist, `DomainError::Unauthorized` if the actor is not its organizer,
    /// or `DomainError::Validation` if the details are invalid.
    pub fn update(
        &mut self,
        actor: &Actor,
        details: ConferenceDetails,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_organizer(actor)?;
        let details = details.validated()?;

        self.record(
            CONFERENCE_UPDATED_EVENT_TYPE,
            ConferenceEventKind::ConferenceUpdated(ConferenceUpdated {
                conference_id: self.id,
                name: details.name,
                location: details.location,
                description: details.description,
                start_date: details.start_date,
                end_date: details.end_date,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Deletes the conference, producing a `ConferenceDeleted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the conference does not
    /// exist, or `DomainError::Unauthorized` if the actor is not its organizer.
    pub fn delete(
        &mut self,
        actor: &Actor,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_organizer(actor)?;

        self.record(
            CONFERENCE_DELETED_EVENT_TYPE,
            ConferenceEventKind::ConferenceDeleted(ConferenceDeleted {
                conference_id: self.id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Replaces the reviewer pool with `reviewer_ids`, producing a
    /// `ReviewerPoolAssigned` event. The ids must already be filtered to
    /// reviewers (see [`super::reviewer_pool::eligible_reviewers`]).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the conference does not
    /// exist, or `DomainError::Unauthorized` if the actor is not its organizer.
    pub fn assign_reviewers(
        &mut self,
        actor: &Actor,
        reviewer_ids: Vec<Uuid>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_organizer(actor)?;

        self.record(
            REVIEWER_POOL_ASSIGNED_EVENT_TYPE,
            ConferenceEventKind::ReviewerPoolAssigned(ReviewerPoolAssigned {
                conference_id: self.id,
                reviewer_ids,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for Conference {
    type Event = ConferenceEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ConferenceEventKind::ConferenceCreated(payload) => {
                self.organizer_id = Some(payload.organizer_id);
                self.details = Some(ConferenceDetails {
                    name: payload.name.clone(),
                    location: payload.location.clone(),
                    description: payload.description.clone(),
                    start_date: payload.start_date,
                    end_date: payload.end_date,
                });
            }
            ConferenceEventKind::ConferenceUpdated(payload) => {
                self.details = Some(ConferenceDetails {
                    name: payload.name.clone(),
                    location: payload.location.clone(),
                    description: payload.description.clone(),
                    start_date: payload.start_date,
                    end_date: payload.end_date,
                });
            }
            ConferenceEventKind::ReviewerPoolAssigned(payload) => {
                self.reviewer_ids.clone_from(&payload.reviewer_ids);
            }
            ConferenceEventKind::ConferenceDeleted(_) => {
                self.deleted = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
