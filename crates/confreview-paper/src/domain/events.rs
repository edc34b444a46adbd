//! Domain events for the Paper Lifecycle & Review context.

use confreview_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{PaperStatus, ReviewStatus};

/// Emitted when an author submits a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSubmitted {
    /// The paper identifier.
    pub paper_id: Uuid,
    /// The conference the paper is submitted to.
    pub conference_id: Uuid,
    /// The submitting author.
    pub author_id: Uuid,
    /// Paper title.
    pub title: String,
    /// Pointer to the uploaded document.
    pub document_ref: String,
}

/// Emitted once per reviewer auto-assigned at submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerAssigned {
    /// The paper identifier.
    pub paper_id: Uuid,
    /// The review record created for the reviewer.
    pub review_id: Uuid,
    /// The assigned reviewer.
    pub reviewer_id: Uuid,
}

/// Emitted when the author uploads a replacement document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionUploaded {
    /// The paper identifier.
    pub paper_id: Uuid,
    /// The paper version after the upload.
    pub version: u32,
    /// Pointer to the new document.
    pub document_ref: String,
}

/// Emitted when a reviewer records a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecisionRecorded {
    /// The paper identifier.
    pub paper_id: Uuid,
    /// The review the decision belongs to.
    pub review_id: Uuid,
    /// The reviewer who decided.
    pub reviewer_id: Uuid,
    /// The recorded decision.
    pub decision: ReviewStatus,
    /// Optional feedback for the author.
    pub feedback: Option<String>,
    /// The aggregated paper status after the decision.
    pub paper_status: PaperStatus,
}

/// Event type identifier for [`PaperSubmitted`].
pub const PAPER_SUBMITTED_EVENT_TYPE: &str = "paper.submitted";

/// Event type identifier for [`ReviewerAssigned`].
pub const REVIEWER_ASSIGNED_EVENT_TYPE: &str = "paper.reviewer_assigned";

/// Event type identifier for [`RevisionUploaded`].
pub const REVISION_UPLOADED_EVENT_TYPE: &str = "paper.revision_uploaded";

/// Event type identifier for [`ReviewDecisionRecorded`].
pub const REVIEW_DECISION_RECORDED_EVENT_TYPE: &str = "paper.review_decision_recorded";

/// Event payload variants for the Paper Lifecycle & Review context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PaperEventKind {
    /// A paper has been submitted.
    PaperSubmitted(PaperSubmitted),
    /// A reviewer has been assigned to the paper.
    ReviewerAssigned(ReviewerAssigned),
    /// A new document version has been uploaded.
    RevisionUploaded(RevisionUploaded),
    /// A reviewer has recorded a decision.
    ReviewDecisionRecorded(ReviewDecisionRecorded),
}

/// Domain event envelope for the Paper Lifecycle & Review context.
#[derive(Debug, Clone)]
pub struct PaperEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PaperEventKind,
}

impl DomainEvent for PaperEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            PaperEventKind::PaperSubmitted(_) => PAPER_SUBMITTED_EVENT_TYPE,
            PaperEventKind::ReviewerAssigned(_) => REVIEWER_ASSIGNED_EVENT_TYPE,
            PaperEventKind::RevisionUploaded(_) => REVISION_UPLOADED_EVENT_TYPE,
            PaperEventKind::ReviewDecisionRecorded(_) => REVIEW_DECISION_RECORDED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("PaperEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
