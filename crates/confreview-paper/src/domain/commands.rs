//! Commands for the Paper Lifecycle & Review context.

use confreview_core::authorization::Actor;
use confreview_core::command::Command;
use uuid::Uuid;

use super::status::ReviewStatus;

/// Command to submit a new paper to a conference.
#[derive(Debug, Clone)]
pub struct SubmitPaper {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitting author.
    pub actor: Actor,
    /// The target conference.
    pub conference_id: Uuid,
    /// Paper title.
    pub title: String,
    /// Pointer to the uploaded document (validated by the handler).
    pub document_ref: String,
}

impl Command for SubmitPaper {
    fn command_type(&self) -> &'static str {
        "paper.submit_paper"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Command to upload a replacement document for a paper.
#[derive(Debug, Clone)]
pub struct UploadRevision {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user uploading the revision.
    pub actor: Actor,
    /// The paper being revised.
    pub paper_id: Uuid,
    /// Pointer to the new document (validated by the handler).
    pub document_ref: String,
}

impl Command for UploadRevision {
    fn command_type(&self) -> &'static str {
        "paper.upload_revision"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Command to record a reviewer's decision on a review.
#[derive(Debug, Clone)]
pub struct RecordReviewDecision {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The reviewer recording the decision.
    pub actor: Actor,
    /// The review being decided.
    pub review_id: Uuid,
    /// Requested status; `Pending` is rejected.
    pub decision: ReviewStatus,
    /// Optional feedback for the author.
    pub feedback: Option<String>,
}

impl Command for RecordReviewDecision {
    fn command_type(&self) -> &'static str {
        "paper.record_review_decision"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }
}
