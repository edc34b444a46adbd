//! Routes for the Conference & Reviewer Pool bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use confreview_conference::application::query_handlers::ConferenceView;
use confreview_conference::application::{command_handlers, query_handlers};
use confreview_conference::domain::aggregates::ConferenceDetails;
use confreview_conference::domain::commands;
use confreview_core::directory::UserIdentity;

use crate::actor::CurrentActor;
use crate::error::{ApiError, JsonBody};
use crate::state::AppState;

/// Request body for creating or updating a conference.
#[derive(Debug, Deserialize)]
pub struct ConferenceRequest {
    /// Conference name.
    pub name: String,
    /// Conference location.
    pub location: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// First day of the conference.
    pub start_date: NaiveDate,
    /// Last day of the conference.
    pub end_date: NaiveDate,
}

impl From<ConferenceRequest> for ConferenceDetails {
    fn from(request: ConferenceRequest) -> Self {
        Self {
            name: request.name,
            location: request.location,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// Request body for POST /{id}/reviewers.
#[derive(Debug, Deserialize)]
pub struct AssignReviewersRequest {
    /// Users to place in the pool; non-reviewers are dropped.
    pub reviewer_ids: Vec<Uuid>,
}

/// GET /
#[instrument(skip(state))]
async fn list_conferences(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
) -> Result<Json<Vec<ConferenceView>>, ApiError> {
    let views = query_handlers::list_conferences(&*state.event_repository).await?;
    Ok(Json(views))
}

/// POST /
#[instrument(skip(state, request), fields(user_id = %actor.user_id))]
async fn create_conference(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    JsonBody(request): JsonBody<ConferenceRequest>,
) -> Result<(StatusCode, Json<ConferenceView>), ApiError> {
    let command = commands::CreateConference {
        correlation_id: Uuid::new_v4(),
        actor,
        details: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_conference command");

    let result = command_handlers::handle_create_conference(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(result.conference)))
}

/// GET /reviewers
#[instrument(skip(state))]
async fn list_reviewer_candidates(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
) -> Result<Json<Vec<UserIdentity>>, ApiError> {
    let candidates = query_handlers::list_reviewer_candidates(&*state.user_directory).await?;
    Ok(Json(candidates))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_conference(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(conference_id): Path<Uuid>,
) -> Result<Json<ConferenceView>, ApiError> {
    let view = query_handlers::get_conference_by_id(conference_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// PUT /{id}
#[instrument(skip(state, request), fields(user_id = %actor.user_id))]
async fn update_conference(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(conference_id): Path<Uuid>,
    JsonBody(request): JsonBody<ConferenceRequest>,
) -> Result<Json<ConferenceView>, ApiError> {
    let command = commands::UpdateConference {
        correlation_id: Uuid::new_v4(),
        actor,
        conference_id,
        details: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling update_conference command");

    let result = command_handlers::handle_update_conference(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.conference))
}

/// DELETE /{id}
#[instrument(skip(state), fields(user_id = %actor.user_id))]
async fn delete_conference(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(conference_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteConference {
        correlation_id: Uuid::new_v4(),
        actor,
        conference_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_conference command");

    command_handlers::handle_delete_conference(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/reviewers
#[instrument(skip(state, request), fields(user_id = %actor.user_id))]
async fn assign_reviewers(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(conference_id): Path<Uuid>,
    JsonBody(request): JsonBody<AssignReviewersRequest>,
) -> Result<Json<ConferenceView>, ApiError> {
    let command = commands::AssignReviewers {
        correlation_id: Uuid::new_v4(),
        actor,
        conference_id,
        reviewer_ids: request.reviewer_ids,
    };

    info!(correlation_id = %command.correlation_id, "handling assign_reviewers command");

    let result = command_handlers::handle_assign_reviewers(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
        &*state.user_directory,
    )
    .await?;

    Ok(Json(result.conference))
}

/// Returns the router for the conference context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_conferences).post(create_conference))
        .route("/reviewers", get(list_reviewer_candidates))
        .route(
            "/{id}",
            get(get_conference)
                .put(update_conference)
                .delete(delete_conference),
        )
        .route("/{id}/reviewers", post(assign_reviewers))
}
