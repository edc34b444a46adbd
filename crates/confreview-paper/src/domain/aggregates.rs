//! Aggregate roots for the Paper Lifecycle & Review context.
//!
//! A [`Paper`] owns its reviews. Every mutation of a paper or one of its
//! reviews goes through the paper's event stream, so a single optimistic
//! concurrency check covers the whole review set.

use confreview_core::aggregate::AggregateRoot;
use confreview_core::authorization::{Actor, Role};
use confreview_core::clock::Clock;
use confreview_core::error::DomainError;
use confreview_core::event::EventMetadata;
use uuid::Uuid;

use super::aggregation::aggregate;
use super::document::DocumentRef;
use super::events::{
    PAPER_SUBMITTED_EVENT_TYPE, PaperEvent, PaperEventKind, PaperSubmitted,
    REVIEW_DECISION_RECORDED_EVENT_TYPE, REVIEWER_ASSIGNED_EVENT_TYPE,
    REVISION_UPLOADED_EVENT_TYPE, ReviewDecisionRecorded, ReviewerAssigned, RevisionUploaded,
};
use super::status::{PaperStatus, ReviewDecision, ReviewStatus};

/// Number of reviewers auto-assigned from the conference pool.
pub const REVIEWERS_PER_PAPER: usize = 2;

/// One reviewer's review of the paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Review identifier.
    pub review_id: Uuid,
    /// The assigned reviewer.
    pub reviewer_id: Uuid,
    /// Current status.
    pub status: ReviewStatus,
    /// Feedback attached to the current decision.
    pub feedback: Option<String>,
}

/// The aggregate root for a paper.
#[derive(Debug)]
pub struct Paper {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current stream version (event count).
    pub(crate) version: i64,
    /// Target conference (set after `PaperSubmitted`).
    pub(crate) conference_id: Option<Uuid>,
    /// Submitting author (set after `PaperSubmitted`).
    pub(crate) author_id: Option<Uuid>,
    /// Paper title.
    pub(crate) title: String,
    /// Pointer to the latest document.
    pub(crate) document_ref: String,
    /// Overall status.
    pub(crate) status: PaperStatus,
    /// Document version, starting at 1.
    pub(crate) document_version: u32,
    /// Reviews in assignment order.
    pub(crate) reviews: Vec<Review>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<PaperEvent>,
}

impl Paper {
    /// Creates a new, not yet submitted, paper.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            conference_id: None,
            author_id: None,
            title: String::new(),
            document_ref: String::new(),
            status: PaperStatus::Submitted,
            document_version: 0,
            reviews: Vec::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the target conference, if submitted.
    #[must_use]
    pub fn conference_id(&self) -> Option<Uuid> {
        self.conference_id
    }

    /// Returns the author, if submitted.
    #[must_use]
    pub fn author_id(&self) -> Option<Uuid> {
        self.author_id
    }

    /// Returns the overall status.
    #[must_use]
    pub fn status(&self) -> PaperStatus {
        self.status
    }

    /// Returns the document version.
    #[must_use]
    pub fn document_version(&self) -> u32 {
        self.document_version
    }

    /// Returns the reviews in assignment order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Returns the review with `review_id`, if it belongs to this paper.
    #[must_use]
    pub fn review(&self, review_id: Uuid) -> Option<&Review> {
        self.reviews.iter().find(|r| r.review_id == review_id)
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: PaperEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = PaperEvent {
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

    /// Submits the paper and auto-assigns the first reviewers of
    /// `reviewer_pool`, producing a `PaperSubmitted` event followed by one
    /// `ReviewerAssigned` event per selected reviewer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the actor is not an author, or
    /// `DomainError::Validation` if the title is blank or the paper was
    /// already submitted.
    pub fn submit(
        &mut self,
        actor: &Actor,
        conference_id: Uuid,
        title: &str,
        document: DocumentRef,
        reviewer_pool: &[Uuid],
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        actor.require_role(Role::Author)?;
        if self.author_id.is_some() {
            return Err(DomainError::Validation(format!(
                "paper {} already submitted",
                self.id
            )));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("paper title is required".to_owned()));
        }

        self.record(
            PAPER_SUBMITTED_EVENT_TYPE,
            PaperEventKind::PaperSubmitted(PaperSubmitted {
                paper_id: self.id,
                conference_id,
                author_id: actor.user_id,
                title: title.to_owned(),
                document_ref: document.as_str().to_owned(),
            }),
            correlation_id,
            clock,
        );

        for reviewer_id in reviewer_pool.iter().take(REVIEWERS_PER_PAPER) {
            self.record(
                REVIEWER_ASSIGNED_EVENT_TYPE,
                PaperEventKind::ReviewerAssigned(ReviewerAssigned {
                    paper_id: self.id,
                    review_id: Uuid::new_v4(),
                    reviewer_id: *reviewer_id,
                }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Uploads a replacement document, producing a `RevisionUploaded` event.
    /// Applying it bumps the version, resets every review to pending, and
    /// puts the paper back under review.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the paper was never
    /// submitted, or `DomainError::Unauthorized` if the actor is not its
    /// author.
    pub fn upload_revision(
        &mut self,
        actor: &Actor,
        document: DocumentRef,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        actor.require_role(Role::Author)?;
        let author_id = self.author_id.ok_or(DomainError::AggregateNotFound(self.id))?;
        actor.require_user(author_id, "paper author")?;

        self.record(
            REVISION_UPLOADED_EVENT_TYPE,
            PaperEventKind::RevisionUploaded(RevisionUploaded {
                paper_id: self.id,
                version: self.document_version + 1,
                document_ref: document.as_str().to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records a reviewer's decision, producing a `ReviewDecisionRecorded`
    /// event that carries the re-aggregated paper status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the actor is not a reviewer or
    /// not the one assigned to the review, `DomainError::AggregateNotFound`
    /// if the review does not belong to this paper, or
    /// `DomainError::Validation` if `decision` is `Pending`.
    pub fn record_review_decision(
        &mut self,
        actor: &Actor,
        review_id: Uuid,
        decision: ReviewStatus,
        feedback: Option<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        actor.require_role(Role::Reviewer)?;
        let review = self
            .review(review_id)
            .ok_or(DomainError::AggregateNotFound(review_id))?;
        actor.require_user(review.reviewer_id, "assigned reviewer")?;
        let decision = ReviewStatus::from(ReviewDecision::try_from(decision)?);

        let statuses: Vec<ReviewStatus> = self
            .reviews
            .iter()
            .map(|r| {
                if r.review_id == review_id {
                    decision
                } else {
                    r.status
                }
            })
            .collect();
        let paper_status = aggregate(self.status, &statuses);

        self.record(
            REVIEW_DECISION_RECORDED_EVENT_TYPE,
            PaperEventKind::ReviewDecisionRecorded(ReviewDecisionRecorded {
                paper_id: self.id,
                review_id,
                reviewer_id: actor.user_id,
                decision,
                feedback,
                paper_status,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for Paper {
    type Event = PaperEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            PaperEventKind::PaperSubmitted(payload) => {
                self.conference_id = Some(payload.conference_id);
                self.author_id = Some(payload.author_id);
                self.title.clone_from(&payload.title);
                self.document_ref.clone_from(&payload.document_ref);
                self.status = PaperStatus::Submitted;
                self.document_version = 1;
            }
            PaperEventKind::ReviewerAssigned(payload) => {
                self.reviews.push(Review {
                    review_id: payload.review_id,
                    reviewer_id: payload.reviewer_id,
                    status: ReviewStatus::Pending,
                    feedback: None,
                });
                self.status = PaperStatus::UnderReview;
            }
            PaperEventKind::RevisionUploaded(payload) => {
                self.document_version = payload.version;
                self.document_ref.clone_from(&payload.document_ref);
                for review in &mut self.reviews {
                    review.status = ReviewStatus::Pending;
                    review.feedback = None;
                }
                self.status = PaperStatus::UnderReview;
            }
            PaperEventKind::ReviewDecisionRecorded(payload) => {
                if let Some(review) = self
                    .reviews
                    .iter_mut()
                    .find(|r| r.review_id == payload.review_id)
                {
                    review.status = payload.decision;
                    review.feedback.clone_from(&payload.feedback);
                }
                self.status = payload.paper_status;
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
