//! Command handlers for the Paper Lifecycle & Review context.
//!
//! Each handler loads the paper stream, runs the transition on the
//! aggregate, and appends the resulting events with the version it read.
//! A concurrent transition on the same paper makes the append fail with
//! `DomainError::ConcurrencyConflict` and nothing is written.

use confreview_conference::application::query_handlers::get_conference_by_id;
use confreview_core::aggregate::AggregateRoot;
use confreview_core::authorization::Role;
use confreview_core::clock::Clock;
use confreview_core::error::DomainError;
use confreview_core::event::{DomainEvent, EventMetadata};
use confreview_core::repository::{EventRepository, StoredEvent};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::query_handlers::{PaperView, ReviewView};
use crate::domain::aggregates::Paper;
use crate::domain::commands::{RecordReviewDecision, SubmitPaper, UploadRevision};
use crate::domain::document::DocumentRef;
use crate::domain::events::{
    PAPER_SUBMITTED_EVENT_TYPE, PaperEvent, PaperEventKind, REVIEWER_ASSIGNED_EVENT_TYPE,
};

/// Result of a command that returns the paper.
#[derive(Debug)]
pub struct PaperCommandResult {
    /// The paper affected or created by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
    /// The paper state after the command.
    pub paper: PaperView,
}

/// Result of a command that returns a single review.
#[derive(Debug)]
pub struct ReviewCommandResult {
    /// The paper that owns the review.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
    /// The review state after the command.
    pub review: ReviewView,
}

fn to_stored_event(event: &PaperEvent) -> StoredEvent {
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

fn decode(stored: &StoredEvent) -> Result<PaperEventKind, DomainError> {
    serde_json::from_value(stored.payload.clone())
        .map_err(|e| DomainError::Infrastructure(format!("event deserialization failed: {e}")))
}

/// Reconstitutes a `Paper` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    paper_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Paper, DomainError> {
    let mut paper = Paper::new(paper_id);
    for stored in existing_events {
        let event = PaperEvent {
            metadata: EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind: decode(stored)?,
        };
        paper.apply(&event);
    }
    Ok(paper)
}

/// Loads an existing paper stream.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the stream is empty or is not
/// a paper stream, or any error from loading and deserializing events.
pub(crate) async fn load_paper(
    paper_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Paper, DomainError> {
    let existing_events = repo.load_events(paper_id).await?;
    match existing_events.first() {
        Some(first) if first.event_type == PAPER_SUBMITTED_EVENT_TYPE => {}
        _ => return Err(DomainError::AggregateNotFound(paper_id)),
    }
    reconstitute(paper_id, &existing_events)
}

/// Resolves the paper that owns `review_id` from the reviewer assignment
/// history.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` (carrying the review id) if no
/// paper was ever assigned that review.
pub(crate) async fn find_paper_for_review(
    review_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Uuid, DomainError> {
    let assignments = repo
        .load_events_by_type(REVIEWER_ASSIGNED_EVENT_TYPE)
        .await?;
    for stored in &assignments {
        if let PaperEventKind::ReviewerAssigned(assigned) = decode(stored)? {
            if assigned.review_id == review_id {
                return Ok(assigned.paper_id);
            }
        }
    }
    Err(DomainError::AggregateNotFound(review_id))
}

/// Persists the uncommitted events of `paper` and folds them into its state.
async fn commit(
    paper: &mut Paper,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events: Vec<StoredEvent> = paper
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    repo.append_events(paper.id, paper.version(), &stored_events)
        .await?;

    for event in paper.uncommitted_events().to_vec() {
        paper.apply(&event);
    }
    paper.clear_uncommitted_events();
    Ok(stored_events)
}

/// Handles the `SubmitPaper` command: creates the paper and auto-assigns the
/// first reviewers of the target conference's pool.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the actor is not an author,
/// `DomainError::Validation` for a blank title or an unsupported document,
/// `DomainError::AggregateNotFound` if the conference does not exist or was
/// deleted, or any persistence error.
#[instrument(
    skip_all,
    fields(
        conference_id = %command.conference_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_submit_paper(
    command: &SubmitPaper,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<PaperCommandResult, DomainError> {
    command.actor.require_role(Role::Author)?;
    if command.title.trim().is_empty() {
        return Err(DomainError::Validation("paper title is required".to_owned()));
    }
    let document = DocumentRef::parse(&command.document_ref)?;
    let conference = get_conference_by_id(command.conference_id, repo).await?;

    let paper_id = Uuid::new_v4();
    let mut paper = Paper::new(paper_id);
    paper.submit(
        &command.actor,
        conference.conference_id,
        &command.title,
        document,
        &conference.reviewer_ids,
        command.correlation_id,
        clock,
    )?;

    let stored_events = commit(&mut paper, repo).await?;
    info!(
        %paper_id,
        author_id = %command.actor.user_id,
        reviewers = paper.reviews().len(),
        status = %paper.status(),
        "paper submitted"
    );

    Ok(PaperCommandResult {
        aggregate_id: paper_id,
        stored_events,
        paper: PaperView::from_aggregate(&paper),
    })
}

/// Handles the `UploadRevision` command: replaces the document, bumps the
/// version, and resets every review to pending.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the actor is not the paper's
/// author, `DomainError::AggregateNotFound` if the paper does not exist,
/// `DomainError::Validation` for an unsupported document, or any persistence
/// error.
#[instrument(
    skip_all,
    fields(
        paper_id = %command.paper_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_upload_revision(
    command: &UploadRevision,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<PaperCommandResult, DomainError> {
    command.actor.require_role(Role::Author)?;
    let mut paper = load_paper(command.paper_id, repo).await?;
    if let Some(author_id) = paper.author_id() {
        command.actor.require_user(author_id, "paper author")?;
    }
    let document = DocumentRef::parse(&command.document_ref)?;

    paper.upload_revision(&command.actor, document, command.correlation_id, clock)?;

    let stored_events = commit(&mut paper, repo).await?;
    info!(
        paper_id = %command.paper_id,
        version = paper.document_version(),
        "revision uploaded"
    );

    Ok(PaperCommandResult {
        aggregate_id: paper.id,
        stored_events,
        paper: PaperView::from_aggregate(&paper),
    })
}

/// Handles the `RecordReviewDecision` command: updates the review and
/// re-aggregates the paper status over the full review set.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the actor is not the assigned
/// reviewer, `DomainError::AggregateNotFound` if the review does not exist,
/// `DomainError::Validation` if the decision is `Pending`, or any
/// persistence error including `DomainError::ConcurrencyConflict`.
#[instrument(
    skip_all,
    fields(
        review_id = %command.review_id,
        correlation_id = %command.correlation_id
    )
)]
pub async fn handle_record_review_decision(
    command: &RecordReviewDecision,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ReviewCommandResult, DomainError> {
    command.actor.require_role(Role::Reviewer)?;
    let paper_id = find_paper_for_review(command.review_id, repo).await?;
    let mut paper = load_paper(paper_id, repo).await?;

    paper.record_review_decision(
        &command.actor,
        command.review_id,
        command.decision,
        command.feedback.clone(),
        command.correlation_id,
        clock,
    )?;

    let stored_events = commit(&mut paper, repo).await?;
    let review = paper
        .review(command.review_id)
        .map(|review| ReviewView::from_review(paper.id, review))
        .ok_or(DomainError::AggregateNotFound(command.review_id))?;
    info!(
        %paper_id,
        review_id = %command.review_id,
        decision = ?command.decision,
        paper_status = %paper.status(),
        "review decision recorded"
    );

    Ok(ReviewCommandResult {
        aggregate_id: paper_id,
        stored_events,
        review,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use confreview_conference::application::command_handlers::{
        handle_assign_reviewers, handle_create_conference, handle_delete_conference,
    };
    use confreview_conference::domain::aggregates::ConferenceDetails;
    use confreview_conference::domain::commands::{
        AssignReviewers, CreateConference, DeleteConference,
    };
    use confreview_core::authorization::{Actor, Role};
    use confreview_core::error::DomainError;
    use confreview_core::repository::EventRepository;
    use confreview_test_support::{
        EmptyEventRepository, FailingEventRepository, FixedClock, InMemoryEventRepository,
        StaticUserDirectory,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_record_review_decision, handle_submit_paper, handle_upload_revision,
    };
    use crate::domain::commands::{RecordReviewDecision, SubmitPaper, UploadRevision};
    use crate::domain::status::{PaperStatus, ReviewStatus};

    struct Fixture {
        repo: InMemoryEventRepository,
        organizer: Actor,
        conference_id: Uuid,
        reviewers: Vec<Uuid>,
    }

    /// A conference whose pool holds `pool_size` reviewers.
    async fn fixture(pool_size: usize) -> Fixture {
        let repo = InMemoryEventRepository::new();
        let organizer = Actor::new(Uuid::new_v4(), Role::Organizer);
        let conference_id = handle_create_conference(
            &CreateConference {
                correlation_id: Uuid::new_v4(),
                actor: organizer,
                details: ConferenceDetails {
                    name: "OSDI".to_owned(),
                    location: "Boston".to_owned(),
                    description: None,
                    start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2026, 7, 3).unwrap(),
                },
            },
            &FixedClock::standard(),
            &repo,
        )
        .await
        .unwrap()
        .aggregate_id;

        let reviewers: Vec<Uuid> = (0..pool_size).map(|_| Uuid::new_v4()).collect();
        let directory = StaticUserDirectory::new(
            reviewers
                .iter()
                .map(|id| StaticUserDirectory::user(*id, Role::Reviewer))
                .collect(),
        );
        handle_assign_reviewers(
            &AssignReviewers {
                correlation_id: Uuid::new_v4(),
                actor: organizer,
                conference_id,
                reviewer_ids: reviewers.clone(),
            },
            &FixedClock::standard(),
            &repo,
            &directory,
        )
        .await
        .unwrap();

        Fixture {
            repo,
            organizer,
            conference_id,
            reviewers,
        }
    }

    fn submit_command(author: Actor, conference_id: Uuid) -> SubmitPaper {
        SubmitPaper {
            correlation_id: Uuid::new_v4(),
            actor: author,
            conference_id,
            title: "Borrow checking at scale".to_owned(),
            document_ref: "uploads/draft.pdf".to_owned(),
        }
    }

    async fn decide(
        repo: &dyn EventRepository,
        reviewer_id: Uuid,
        review_id: Uuid,
        decision: ReviewStatus,
    ) -> Result<super::ReviewCommandResult, DomainError> {
        handle_record_review_decision(
            &RecordReviewDecision {
                correlation_id: Uuid::new_v4(),
                actor: Actor::new(reviewer_id, Role::Reviewer),
                review_id,
                decision,
                feedback: Some("clarify section 3".to_owned()),
            },
            &FixedClock::standard(),
            repo,
        )
        .await
    }

    #[tokio::test]
    async fn test_handle_submit_paper_assigns_two_reviewers_from_large_pool() {
        // Arrange
        let fx = fixture(3).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let command = submit_command(author, fx.conference_id);

        // Act
        let result = handle_submit_paper(&command, &FixedClock::standard(), &fx.repo)
            .await
            .unwrap();

        // Assert
        let paper = result.paper;
        assert_eq!(paper.status, PaperStatus::UnderReview);
        assert_eq!(paper.version, 1);
        assert_eq!(paper.author_id, author.user_id);
        assert_eq!(paper.reviews.len(), 2);
        assert_eq!(paper.reviews[0].reviewer_id, fx.reviewers[0]);
        assert_eq!(paper.reviews[1].reviewer_id, fx.reviewers[1]);
        assert!(paper
            .reviews
            .iter()
            .all(|r| r.status == ReviewStatus::Pending && r.feedback.is_none()));

        let types: Vec<&str> = result
            .stored_events
            .iter()
            .map(|e| e.event_type.as_str())
            .collect();
        assert_eq!(
            types,
            vec![
                "paper.submitted",
                "paper.reviewer_assigned",
                "paper.reviewer_assigned"
            ]
        );
        assert_eq!(fx.repo.stream_len(result.aggregate_id), 3);
    }

    #[tokio::test]
    async fn test_handle_submit_paper_with_empty_pool_stays_submitted() {
        let fx = fixture(0).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);

        let result = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();

        assert_eq!(result.paper.status, PaperStatus::Submitted);
        assert!(result.paper.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_handle_submit_paper_rejects_unknown_conference() {
        // Arrange
        let conference_id = Uuid::new_v4();
        let author = Actor::new(Uuid::new_v4(), Role::Author);

        // Act
        let result = handle_submit_paper(
            &submit_command(author, conference_id),
            &FixedClock::standard(),
            &EmptyEventRepository,
        )
        .await;

        // Assert
        match result {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, conference_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_submit_paper_rejects_deleted_conference() {
        // Arrange
        let fx = fixture(2).await;
        handle_delete_conference(
            &DeleteConference {
                correlation_id: Uuid::new_v4(),
                actor: fx.organizer,
                conference_id: fx.conference_id,
            },
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let author = Actor::new(Uuid::new_v4(), Role::Author);

        // Act
        let result = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::AggregateNotFound(_))));
    }

    #[tokio::test]
    async fn test_ids_of_the_other_aggregate_kind_resolve_to_not_found() {
        // Arrange
        let fx = fixture(1).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let paper_id = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap()
        .aggregate_id;

        // Act
        let submit_to_paper = handle_submit_paper(
            &submit_command(author, paper_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await;
        let revise_conference = handle_upload_revision(
            &UploadRevision {
                correlation_id: Uuid::new_v4(),
                actor: author,
                paper_id: fx.conference_id,
                document_ref: "uploads/v2.pdf".to_owned(),
            },
            &FixedClock::standard(),
            &fx.repo,
        )
        .await;

        // Assert
        match submit_to_paper {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, paper_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
        match revise_conference {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, fx.conference_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
        assert_eq!(fx.repo.stream_len(fx.conference_id), 2);
        assert_eq!(fx.repo.stream_len(paper_id), 2);
    }

    #[tokio::test]
    async fn test_handle_submit_paper_validates_before_loading_conference() {
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let mut command = submit_command(author, Uuid::new_v4());
        command.document_ref = "notes.txt".to_owned();

        let result =
            handle_submit_paper(&command, &FixedClock::standard(), &FailingEventRepository).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_submit_paper_rejects_reviewer_role() {
        let fx = fixture(1).await;
        let command = submit_command(Actor::new(fx.reviewers[0], Role::Reviewer), fx.conference_id);

        let result = handle_submit_paper(&command, &FixedClock::standard(), &fx.repo).await;

        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_review_decisions_drive_paper_status() {
        // Arrange
        let fx = fixture(2).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let reviews = submitted.paper.reviews;

        // Act
        let first = decide(
            &fx.repo,
            reviews[0].reviewer_id,
            reviews[0].review_id,
            ReviewStatus::Accepted,
        )
        .await
        .unwrap();
        let paper_after_first = crate::application::query_handlers::get_paper_by_id(
            submitted.aggregate_id,
            &fx.repo,
        )
        .await
        .unwrap();
        decide(
            &fx.repo,
            reviews[1].reviewer_id,
            reviews[1].review_id,
            ReviewStatus::Accepted,
        )
        .await
        .unwrap();
        let paper_after_second = crate::application::query_handlers::get_paper_by_id(
            submitted.aggregate_id,
            &fx.repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(first.review.status, ReviewStatus::Accepted);
        assert_eq!(first.review.feedback.as_deref(), Some("clarify section 3"));
        assert_eq!(first.review.paper_id, submitted.aggregate_id);
        assert_eq!(paper_after_first.status, PaperStatus::UnderReview);
        assert_eq!(paper_after_second.status, PaperStatus::Accepted);
    }

    #[tokio::test]
    async fn test_revision_request_then_revision_resets_reviews() {
        // Arrange
        let fx = fixture(2).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let reviews = submitted.paper.reviews;
        decide(
            &fx.repo,
            reviews[0].reviewer_id,
            reviews[0].review_id,
            ReviewStatus::RevisionRequested,
        )
        .await
        .unwrap();

        // Act
        let revised = handle_upload_revision(
            &UploadRevision {
                correlation_id: Uuid::new_v4(),
                actor: author,
                paper_id: submitted.aggregate_id,
                document_ref: "uploads/final.docx".to_owned(),
            },
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();

        // Assert
        let paper = revised.paper;
        assert_eq!(paper.version, 2);
        assert_eq!(paper.document_ref, "uploads/final.docx");
        assert_eq!(paper.status, PaperStatus::UnderReview);
        assert_eq!(paper.reviews.len(), 2);
        assert!(paper
            .reviews
            .iter()
            .all(|r| r.status == ReviewStatus::Pending && r.feedback.is_none()));
        assert_eq!(revised.stored_events.len(), 1);
        assert_eq!(revised.stored_events[0].event_type, "paper.revision_uploaded");
    }

    #[tokio::test]
    async fn test_handle_upload_revision_by_non_author_leaves_paper_unchanged() {
        // Arrange
        let fx = fixture(1).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let before = fx.repo.stream_len(submitted.aggregate_id);

        // Act
        let result = handle_upload_revision(
            &UploadRevision {
                correlation_id: Uuid::new_v4(),
                actor: Actor::new(Uuid::new_v4(), Role::Author),
                paper_id: submitted.aggregate_id,
                document_ref: "uploads/hijack.pdf".to_owned(),
            },
            &FixedClock::standard(),
            &fx.repo,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        assert_eq!(fx.repo.stream_len(submitted.aggregate_id), before);
    }

    #[tokio::test]
    async fn test_handle_upload_revision_for_missing_paper_returns_not_found() {
        let paper_id = Uuid::new_v4();

        let result = handle_upload_revision(
            &UploadRevision {
                correlation_id: Uuid::new_v4(),
                actor: Actor::new(Uuid::new_v4(), Role::Author),
                paper_id,
                document_ref: "uploads/v2.pdf".to_owned(),
            },
            &FixedClock::standard(),
            &EmptyEventRepository,
        )
        .await;

        match result {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, paper_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pending_decision_is_rejected_and_review_unchanged() {
        // Arrange
        let fx = fixture(1).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let review = &submitted.paper.reviews[0];
        let before = fx.repo.stream_len(submitted.aggregate_id);

        // Act
        let result = decide(
            &fx.repo,
            review.reviewer_id,
            review.review_id,
            ReviewStatus::Pending,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(fx.repo.stream_len(submitted.aggregate_id), before);
    }

    #[tokio::test]
    async fn test_decision_by_other_reviewer_is_unauthorized() {
        let fx = fixture(2).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let reviews = &submitted.paper.reviews;

        let result = decide(
            &fx.repo,
            reviews[1].reviewer_id,
            reviews[0].review_id,
            ReviewStatus::Accepted,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_decision_on_unknown_review_returns_not_found() {
        let fx = fixture(1).await;
        let review_id = Uuid::new_v4();

        let result = decide(&fx.repo, fx.reviewers[0], review_id, ReviewStatus::Accepted).await;

        match result {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, review_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_append_is_rejected_with_concurrency_conflict() {
        // Arrange
        let fx = fixture(2).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let submitted = handle_submit_paper(
            &submit_command(author, fx.conference_id),
            &FixedClock::standard(),
            &fx.repo,
        )
        .await
        .unwrap();
        let paper_id = submitted.aggregate_id;
        let mut stale = super::load_paper(paper_id, &fx.repo).await.unwrap();
        let review = submitted.paper.reviews[0].clone();
        decide(
            &fx.repo,
            review.reviewer_id,
            review.review_id,
            ReviewStatus::Accepted,
        )
        .await
        .unwrap();

        // Act
        stale
            .record_review_decision(
                &Actor::new(review.reviewer_id, Role::Reviewer),
                review.review_id,
                ReviewStatus::RevisionRequested,
                None,
                Uuid::new_v4(),
                &FixedClock::standard(),
            )
            .unwrap();
        let result = super::commit(&mut stale, &fx.repo).await;

        // Assert
        match result {
            Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual,
            }) => {
                assert_eq!(aggregate_id, paper_id);
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("expected ConcurrencyConflict, got {other:?}"),
        }
    }
}
