//! Routes for the Paper Lifecycle & Review bounded context: papers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use confreview_paper::application::query_handlers::PaperView;
use confreview_paper::application::{command_handlers, query_handlers};
use confreview_paper::domain::commands;

use crate::actor::CurrentActor;
use crate::error::{ApiError, JsonBody};
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct SubmitPaperRequest {
    /// The target conference.
    pub conference_id: Uuid,
    /// Paper title.
    pub title: String,
    /// Pointer to the uploaded document.
    pub document_ref: String,
}

/// Request body for PUT /{id}/revision.
#[derive(Debug, Deserialize)]
pub struct UploadRevisionRequest {
    /// Pointer to the new document.
    pub document_ref: String,
}

/// GET /
#[instrument(skip(state), fields(user_id = %actor.user_id, role = %actor.role))]
async fn list_papers(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<PaperView>>, ApiError> {
    let views = query_handlers::list_papers_for_actor(&actor, &*state.event_repository).await?;
    Ok(Json(views))
}

/// POST /
#[instrument(skip(state, request), fields(user_id = %actor.user_id, conference_id = %request.conference_id))]
async fn submit_paper(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    JsonBody(request): JsonBody<SubmitPaperRequest>,
) -> Result<(StatusCode, Json<PaperView>), ApiError> {
    let command = commands::SubmitPaper {
        correlation_id: Uuid::new_v4(),
        actor,
        conference_id: request.conference_id,
        title: request.title,
        document_ref: request.document_ref,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_paper command");

    let result = command_handlers::handle_submit_paper(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(result.paper)))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_paper(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<PaperView>, ApiError> {
    let view = query_handlers::get_paper_by_id(paper_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// PUT /{id}/revision
#[instrument(skip(state, request), fields(user_id = %actor.user_id))]
async fn upload_revision(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(paper_id): Path<Uuid>,
    JsonBody(request): JsonBody<UploadRevisionRequest>,
) -> Result<Json<PaperView>, ApiError> {
    let command = commands::UploadRevision {
        correlation_id: Uuid::new_v4(),
        actor,
        paper_id,
        document_ref: request.document_ref,
    };

    info!(correlation_id = %command.correlation_id, "handling upload_revision command");

    let result = command_handlers::handle_upload_revision(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(result.paper))
}

/// Returns the router for papers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_papers).post(submit_paper))
        .route("/{id}", get(get_paper))
        .route("/{id}/revision", put(upload_revision))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use chrono::NaiveDate;
    use confreview_conference::application::command_handlers::{
        handle_assign_reviewers, handle_create_conference,
    };
    use confreview_conference::domain::aggregates::ConferenceDetails;
    use confreview_conference::domain::commands::{AssignReviewers, CreateConference};
    use confreview_core::authorization::{Actor, Role};
    use confreview_test_support::{FixedClock, InMemoryEventRepository, StaticUserDirectory};
    use serde_json::json;

    use crate::routes::testing::{app_state_with, send};

    fn app(repo: &Arc<InMemoryEventRepository>) -> Router {
        router().with_state(app_state_with(
            repo.clone(),
            Arc::new(StaticUserDirectory::default()),
        ))
    }

    async fn conference_with_pool(repo: &InMemoryEventRepository, reviewers: &[Uuid]) -> Uuid {
        let organizer = Actor::new(Uuid::new_v4(), Role::Organizer);
        let conference_id = handle_create_conference(
            &CreateConference {
                correlation_id: Uuid::new_v4(),
                actor: organizer,
                details: ConferenceDetails {
                    name: "POPL".to_owned(),
                    location: "Denver".to_owned(),
                    description: None,
                    start_date: NaiveDate::from_ymd_opt(2027, 1, 20).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2027, 1, 22).unwrap(),
                },
            },
            &FixedClock::standard(),
            repo,
        )
        .await
        .unwrap()
        .aggregate_id;
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
                reviewer_ids: reviewers.to_vec(),
            },
            &FixedClock::standard(),
            repo,
            &directory,
        )
        .await
        .unwrap();
        conference_id
    }

    #[tokio::test]
    async fn test_submit_paper_returns_201_under_review() {
        // Arrange
        let repo = Arc::new(InMemoryEventRepository::new());
        let reviewers = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let conference_id = conference_with_pool(&repo, &reviewers).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);

        // Act
        let (status, json) = send(
            app(&repo),
            "POST",
            "/",
            Some(author),
            Some(&json!({
                "conference_id": conference_id,
                "title": "Gradual ownership",
                "document_ref": "gradual.pdf"
            })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "UNDER_REVIEW");
        assert_eq!(json["version"], 1);
        assert_eq!(json["author_id"], author.user_id.to_string());
        let reviews = json["reviews"].as_array().unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r["status"] == "PENDING"));
    }

    #[tokio::test]
    async fn test_submit_paper_with_unsupported_document_returns_400() {
        let repo = Arc::new(InMemoryEventRepository::new());
        let conference_id = conference_with_pool(&repo, &[]).await;

        let (status, json) = send(
            app(&repo),
            "POST",
            "/",
            Some(Actor::new(Uuid::new_v4(), Role::Author)),
            Some(&json!({
                "conference_id": conference_id,
                "title": "Gradual ownership",
                "document_ref": "gradual.exe"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_revision_by_other_author_returns_403_and_get_shows_unchanged_paper() {
        // Arrange
        let repo = Arc::new(InMemoryEventRepository::new());
        let conference_id = conference_with_pool(&repo, &[Uuid::new_v4()]).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let (_, submitted) = send(
            app(&repo),
            "POST",
            "/",
            Some(author),
            Some(&json!({
                "conference_id": conference_id,
                "title": "Gradual ownership",
                "document_ref": "gradual.pdf"
            })),
        )
        .await;
        let paper_id = submitted["paper_id"].as_str().unwrap().to_owned();

        // Act
        let (status, _) = send(
            app(&repo),
            "PUT",
            &format!("/{paper_id}/revision"),
            Some(Actor::new(Uuid::new_v4(), Role::Author)),
            Some(&json!({ "document_ref": "other.pdf" })),
        )
        .await;
        let (_, paper) = send(
            app(&repo),
            "GET",
            &format!("/{paper_id}"),
            Some(author),
            None,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(paper["version"], 1);
        assert_eq!(paper["document_ref"], "gradual.pdf");
    }

    #[tokio::test]
    async fn test_revision_by_author_bumps_version() {
        // Arrange
        let repo = Arc::new(InMemoryEventRepository::new());
        let conference_id = conference_with_pool(&repo, &[]).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        let (_, submitted) = send(
            app(&repo),
            "POST",
            "/",
            Some(author),
            Some(&json!({
                "conference_id": conference_id,
                "title": "Gradual ownership",
                "document_ref": "gradual.pdf"
            })),
        )
        .await;
        let paper_id = submitted["paper_id"].as_str().unwrap().to_owned();

        // Act
        let (status, json) = send(
            app(&repo),
            "PUT",
            &format!("/{paper_id}/revision"),
            Some(author),
            Some(&json!({ "document_ref": "gradual-v2.docx" })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["version"], 2);
        assert_eq!(json["status"], "UNDER_REVIEW");
        assert_eq!(json["document_ref"], "gradual-v2.docx");
    }

    #[tokio::test]
    async fn test_list_papers_shows_only_own_papers_to_author() {
        // Arrange
        let repo = Arc::new(InMemoryEventRepository::new());
        let conference_id = conference_with_pool(&repo, &[]).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);
        for actor in [author, Actor::new(Uuid::new_v4(), Role::Author)] {
            send(
                app(&repo),
                "POST",
                "/",
                Some(actor),
                Some(&json!({
                    "conference_id": conference_id,
                    "title": "Gradual ownership",
                    "document_ref": "gradual.pdf"
                })),
            )
            .await;
        }

        // Act
        let (status, json) = send(app(&repo), "GET", "/", Some(author), None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let papers = json.as_array().unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0]["author_id"], author.user_id.to_string());
    }

    #[tokio::test]
    async fn test_conference_id_used_as_paper_id_returns_404() {
        // Arrange
        let repo = Arc::new(InMemoryEventRepository::new());
        let conference_id = conference_with_pool(&repo, &[]).await;
        let author = Actor::new(Uuid::new_v4(), Role::Author);

        // Act
        let (get_status, get_json) = send(
            app(&repo),
            "GET",
            &format!("/{conference_id}"),
            Some(author),
            None,
        )
        .await;
        let (revise_status, _) = send(
            app(&repo),
            "PUT",
            &format!("/{conference_id}/revision"),
            Some(author),
            Some(&json!({ "document_ref": "v2.pdf" })),
        )
        .await;

        // Assert
        assert_eq!(get_status, StatusCode::NOT_FOUND);
        assert_eq!(get_json["error"], "aggregate_not_found");
        assert_eq!(revise_status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_unknown_paper_returns_404() {
        let repo = Arc::new(InMemoryEventRepository::new());

        let (status, json) = send(
            app(&repo),
            "GET",
            &format!("/{}", Uuid::new_v4()),
            Some(Actor::new(Uuid::new_v4(), Role::Reviewer)),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "aggregate_not_found");
    }
}
