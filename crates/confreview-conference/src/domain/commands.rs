//! Commands for the Conference & Reviewer Pool context.

use confreview_core::authorization::Actor;
use confreview_core::command::Command;
use uuid::Uuid;

use super::aggregates::ConferenceDetails;

/// Command to create a new conference.
#[derive(Debug, Clone)]
pub struct CreateConference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The organizer creating the conference.
    pub actor: Actor,
    /// Conference details.
    pub details: ConferenceDetails,
}

impl Command for CreateConference {
    fn command_type(&self) -> &'static str {
        "conference.create_conference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Command to edit a conference's details.
#[derive(Debug, Clone)]
pub struct UpdateConference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user issuing the edit.
    pub actor: Actor,
    /// The conference to edit.
    pub conference_id: Uuid,
    /// Replacement details.
    pub details: ConferenceDetails,
}

impl Command for UpdateConference {
    fn command_type(&self) -> &'static str {
        "conference.update_conference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Command to delete a conference.
#[derive(Debug, Clone)]
pub struct DeleteConference {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user issuing the deletion.
    pub actor: Actor,
    /// The conference to delete.
    pub conference_id: Uuid,
}

impl Command for DeleteConference {
    fn command_type(&self) -> &'static str {
        "conference.delete_conference"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Command to replace a conference's reviewer pool.
#[derive(Debug, Clone)]
pub struct AssignReviewers {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user issuing the assignment.
    pub actor: Actor,
    /// The conference whose pool is replaced.
    pub conference_id: Uuid,
    /// Requested reviewer ids; non-reviewers and unknown ids are dropped.
    pub reviewer_ids: Vec<Uuid>,
}

impl Command for AssignReviewers {
    fn command_type(&self) -> &'static str {
        "conference.assign_reviewers"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}
