//! services/api/src/web/projects.rs
//!
//! CRUD endpoints for projects. Updates replace the stored section
//! structure wholesale; there is no merging of concurrent edits.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use draftsmith_core::domain::{Project, ProjectDraft, Section};
use draftsmith_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// The payload for creating a project or replacing one on update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProjectPayload {
    pub title: String,
    pub main_topic: String,
    pub doc_type: String,
    /// Ordered section list; order determines heading/slide order on export.
    #[schema(value_type = Vec<Object>)]
    pub structure: Vec<Section>,
}

impl ProjectPayload {
    fn into_draft(self) -> ProjectDraft {
        ProjectDraft {
            title: self.title,
            main_topic: self.main_topic,
            doc_type: self.doc_type,
            structure: self.structure,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProjectOut {
    pub id: i64,
    pub title: String,
    pub main_topic: String,
    pub doc_type: String,
    #[schema(value_type = Vec<Object>)]
    pub structure: Vec<Section>,
    pub owner_id: i64,
}

impl From<Project> for ProjectOut {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            main_topic: project.main_topic,
            doc_type: project.doc_type,
            structure: project.structure,
            owner_id: project.owner_id,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UpdateResponse {
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /projects/{user_id} - List a user's projects
#[utoipa::path(
    get,
    path = "/projects/{user_id}",
    params(("user_id" = i64, Path, description = "The owner's user id")),
    responses(
        (status = 200, description = "The user's projects in id order", body = [ProjectOut]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_projects_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let projects = state.db.get_projects(user_id).await.map_err(|e| {
        error!("Failed to list projects for user {user_id}: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to list projects".to_string(),
        )
    })?;

    let out: Vec<ProjectOut> = projects.into_iter().map(ProjectOut::from).collect();
    Ok(Json(out))
}

/// POST /projects/{user_id} - Create a project owned by the user
#[utoipa::path(
    post,
    path = "/projects/{user_id}",
    params(("user_id" = i64, Path, description = "The owner's user id")),
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created", body = ProjectOut),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_project_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let project = state
        .db
        .create_project(user_id, payload.into_draft())
        .await
        .map_err(|e| {
            error!("Failed to create project for user {user_id}: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create project".to_string(),
            )
        })?;

    Ok((StatusCode::CREATED, Json(ProjectOut::from(project))))
}

/// PUT /projects/{project_id} - Replace a project wholesale
#[utoipa::path(
    put,
    path = "/projects/{project_id}",
    params(("project_id" = i64, Path, description = "The project to replace")),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project updated", body = UpdateResponse),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_project_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .update_project(project_id, payload.into_draft())
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => (StatusCode::NOT_FOUND, "Project not found".to_string()),
            e => {
                error!("Failed to update project {project_id}: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to update project".to_string(),
                )
            }
        })?;

    Ok(Json(UpdateResponse {
        message: "Updated".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftsmith_core::domain::SectionStatus;

    #[test]
    fn payload_deserializes_the_client_wire_format() {
        let payload: ProjectPayload = serde_json::from_str(
            r#"{
                "title": "Q3 Marketing Strategy",
                "main_topic": "Launch plan",
                "doc_type": "powerpoint",
                "structure": [
                    {
                        "id": "s1",
                        "title": "Market Analysis",
                        "content": "**Competitor A**",
                        "refinements": [
                            {
                                "prompt": "shorter",
                                "generatedContent": "Competitor A",
                                "timestamp": "2024-05-01T12:00:00Z"
                            }
                        ],
                        "feedback": {"liked": true},
                        "status": "done"
                    },
                    {"id": "s2", "title": "Target Audience"}
                ]
            }"#,
        )
        .unwrap();

        let draft = payload.into_draft();
        assert_eq!(draft.structure.len(), 2);
        assert_eq!(draft.structure[0].status, SectionStatus::Done);
        assert_eq!(draft.structure[0].feedback.liked, Some(true));
        assert_eq!(draft.structure[0].refinements.len(), 1);
        // Sparse sections pick up defaults from the schema.
        assert_eq!(draft.structure[1].content, "");
        assert_eq!(draft.structure[1].status, SectionStatus::Pending);
    }

    #[test]
    fn malformed_section_status_is_rejected_before_business_logic() {
        let result = serde_json::from_str::<ProjectPayload>(
            r#"{
                "title": "t", "main_topic": "m", "doc_type": "word",
                "structure": [{"id": "s1", "title": "x", "status": "finished"}]
            }"#,
        );
        assert!(result.is_err());
    }
}
