//! services/api/src/web/export.rs
//!
//! The export endpoint: loads a stored project and streams it back as a
//! downloadable Word document or PowerPoint deck, selected by the project's
//! `doc_type` tag.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use draftsmith_core::export::{export_project, DocFormat};
use draftsmith_core::ports::PortError;
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;

/// POST /export/{project_id} - Download a project as a document or deck
#[utoipa::path(
    post,
    path = "/export/{project_id}",
    params(("project_id" = i64, Path, description = "The project to export")),
    responses(
        (status = 200, description = "The exported file as an attachment", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn export_project_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Fetch the project from the store.
    let project = state.db.get_project(project_id).await.map_err(|e| match e {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, "Project not found".to_string()),
        e => {
            error!("Failed to load project {project_id} for export: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load project".to_string(),
            )
        }
    })?;

    // 2. Serialize it in the format the doc_type tag selects.
    let format = DocFormat::from_tag(&project.doc_type);
    let bytes = export_project(&project.title, &project.structure, format).map_err(|e| {
        error!("Failed to export project {project_id}: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to export project".to_string(),
        )
    })?;

    // 3. Return it as a downloadable attachment.
    let filename = format!("{}.{}", project.title, format.extension());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.media_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    ))
}
