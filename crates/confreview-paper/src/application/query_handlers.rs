//! Query handlers for the Paper Lifecycle & Review context.
//!
//! This module contains query handlers that reconstitute paper aggregates
//! from stored events and return read-only view DTOs.

use confreview_conference::application::query_handlers::get_conference_by_id;
use confreview_core::authorization::{Actor, Role};
use confreview_core::error::DomainError;
use confreview_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::{Paper, Review};
use crate::domain::events::PAPER_SUBMITTED_EVENT_TYPE;
use crate::domain::status::{PaperStatus, ReviewStatus};

/// Read-only view of one review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    /// The review identifier.
    pub review_id: Uuid,
    /// The paper under review.
    pub paper_id: Uuid,
    /// The assigned reviewer.
    pub reviewer_id: Uuid,
    /// Current review status.
    pub status: ReviewStatus,
    /// Feedback attached to the current decision.
    pub feedback: Option<String>,
}

impl ReviewView {
    /// Builds a view of `review`, owned by paper `paper_id`.
    #[must_use]
    pub fn from_review(paper_id: Uuid, review: &Review) -> Self {
        Self {
            review_id: review.review_id,
            paper_id,
            reviewer_id: review.reviewer_id,
            status: review.status,
            feedback: review.feedback.clone(),
        }
    }
}

/// Read-only view of a paper aggregate and its reviews.
#[derive(Debug, Clone, Serialize)]
pub struct PaperView {
    /// The paper identifier.
    pub paper_id: Uuid,
    /// The conference the paper was submitted to.
    pub conference_id: Uuid,
    /// The submitting author.
    pub author_id: Uuid,
    /// Paper title.
    pub title: String,
    /// Pointer to the latest document.
    pub document_ref: String,
    /// Overall status.
    pub status: PaperStatus,
    /// Document version, starting at 1.
    pub version: u32,
    /// Reviews in assignment order.
    pub reviews: Vec<ReviewView>,
    /// Stream version (event count), for optimistic concurrency.
    pub stream_version: i64,
}

impl PaperView {
    /// Builds a view of a submitted `paper`.
    #[must_use]
    pub fn from_aggregate(paper: &Paper) -> Self {
        Self {
            paper_id: paper.id,
            conference_id: paper.conference_id.unwrap_or_default(),
            author_id: paper.author_id.unwrap_or_default(),
            title: paper.title.clone(),
            document_ref: paper.document_ref.clone(),
            status: paper.status,
            version: paper.document_version,
            reviews: paper
                .reviews
                .iter()
                .map(|review| ReviewView::from_review(paper.id, review))
                .collect(),
            stream_version: paper.version,
        }
    }
}

/// Retrieves a paper, with its reviews, by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the ID does not name a paper
/// stream.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_paper_by_id(
    paper_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<PaperView, DomainError> {
    let paper = command_handlers::load_paper(paper_id, repo).await?;
    Ok(PaperView::from_aggregate(&paper))
}

async fn all_papers(repo: &dyn EventRepository) -> Result<Vec<Paper>, DomainError> {
    let submitted = repo.load_events_by_type(PAPER_SUBMITTED_EVENT_TYPE).await?;
    let mut papers = Vec::with_capacity(submitted.len());
    for event in &submitted {
        papers.push(command_handlers::load_paper(event.aggregate_id, repo).await?);
    }
    Ok(papers)
}

/// Lists the papers visible to `actor`, in submission order.
///
/// Authors see their own papers, reviewers see papers with a review assigned
/// to them, and organizers see the papers of the conferences they organize.
///
/// # Errors
///
/// Returns any error from loading or deserializing events.
pub async fn list_papers_for_actor(
    actor: &Actor,
    repo: &dyn EventRepository,
) -> Result<Vec<PaperView>, DomainError> {
    let mut visible = Vec::new();
    for paper in all_papers(repo).await? {
        let include = match actor.role {
            Role::Author => paper.author_id() == Some(actor.user_id),
            Role::Reviewer => paper
                .reviews()
                .iter()
                .any(|review| review.reviewer_id == actor.user_id),
            Role::Organizer => match paper.conference_id() {
                Some(conference_id) => match get_conference_by_id(conference_id, repo).await {
                    Ok(conference) => conference.organizer_id == actor.user_id,
                    Err(DomainError::AggregateNotFound(_)) => false,
                    Err(e) => return Err(e),
                },
                None => false,
            },
        };
        if include {
            visible.push(PaperView::from_aggregate(&paper));
        }
    }
    Ok(visible)
}

/// Lists the reviews of one paper, in assignment order.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the paper does not exist, or
/// any error from loading or deserializing events.
pub async fn list_reviews_for_paper(
    paper_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Vec<ReviewView>, DomainError> {
    Ok(get_paper_by_id(paper_id, repo).await?.reviews)
}

/// Lists every review assigned to the acting reviewer.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` if the actor is not a reviewer, or
/// any error from loading or deserializing events.
pub async fn list_reviews_for_reviewer(
    actor: &Actor,
    repo: &dyn EventRepository,
) -> Result<Vec<ReviewView>, DomainError> {
    actor.require_role(Role::Reviewer)?;
    Ok(all_papers(repo)
        .await?
        .iter()
        .flat_map(|paper| {
            paper
                .reviews()
                .iter()
                .filter(|review| review.reviewer_id == actor.user_id)
                .map(|review| ReviewView::from_review(paper.id, review))
        })
        .collect())
}
