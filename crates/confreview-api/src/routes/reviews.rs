//! Routes for the Paper Lifecycle & Review bounded context: reviews.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use confreview_paper::application::query_handlers::ReviewView;
use confreview_paper::application::{command_handlers, query_handlers};
use confreview_paper::domain::commands;
use confreview_paper::domain::status::ReviewStatus;

use crate::actor::CurrentActor;
use crate::error::{ApiError, JsonBody};
use crate::state::AppState;

/// Request body for PUT /{id}.
#[derive(Debug, Deserialize)]
pub struct RecordDecisionRequest {
    /// `ACCEPTED` or `REVISION_REQUESTED`.
    pub decision: ReviewStatus,
    /// Optional feedback for the author.
    #[serde(default)]
    pub feedback: Option<String>,
}

/// GET /mine
#[instrument(skip(state), fields(user_id = %actor.user_id))]
async fn list_my_reviews(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ReviewView>>, ApiError> {
    let reviews = query_handlers::list_reviews_for_reviewer(&actor, &*state.event_repository).await?;
    Ok(Json(reviews))
}

/// GET /paper/{paper_id}
#[instrument(skip(state))]
async fn list_paper_reviews(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewView>>, ApiError> {
    let reviews = query_handlers::list_reviews_for_paper(paper_id, &*state.event_repository).await?;
    Ok(Json(reviews))
}

/// PUT /{id}
#[instrument(skip(state, request), fields(user_id = %actor.user_id, decision = ?request.decision))]
async fn record_decision(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(review_id): Path<Uuid>,
    JsonBody(request): JsonBody<RecordDecisionRequest>,
) -> Result<Json<ReviewView>, ApiError> {
    let command = commands::RecordReviewDecision {
        correlation_id: Uuid::new_v4(),
        actor,
        review_id,
        decision: request.decision,
        feedback: request.feedback,
    };

    info!(correlation_id = %command.correlation_id, "handling record_review_decision command");

    let result = command_handlers::handle_record_review_decision(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.review))
}

/// Returns the router for reviews.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(list_my_reviews))
        .route("/paper/{paper_id}", get(list_paper_reviews))
        .route("/{id}", put(record_decision))
}
