//! services/api/src/web/ai.rs
//!
//! Endpoints for AI-assisted authoring: outline suggestion, section content
//! generation, and refinement of existing content. The oracle degrades to
//! fallback values on provider failure, so these handlers never error.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub topic: String,
    pub section_title: String,
    pub doc_type: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RefineRequest {
    pub content: String,
    pub instruction: String,
}

#[derive(Deserialize, IntoParams)]
pub struct OutlineParams {
    pub topic: String,
    pub doc_type: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct OutlineResponse {
    pub outline: Vec<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /ai/generate - Generate body text for one section
#[utoipa::path(
    post,
    path = "/ai/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated content (or a placeholder if the provider failed)", body = ContentResponse)
    )
)]
pub async fn generate_content_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Json<ContentResponse> {
    let content = state
        .oracle
        .generate_section_content(&req.topic, &req.section_title, &req.doc_type)
        .await;
    Json(ContentResponse { content })
}

/// POST /ai/refine - Rewrite existing content per an instruction
#[utoipa::path(
    post,
    path = "/ai/refine",
    request_body = RefineRequest,
    responses(
        (status = 200, description = "Refined content (or the original if the provider failed)", body = ContentResponse)
    )
)]
pub async fn refine_content_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefineRequest>,
) -> Json<ContentResponse> {
    let content = state
        .oracle
        .refine_content(&req.content, &req.instruction)
        .await;
    Json(ContentResponse { content })
}

/// GET /ai/outline - Suggest section titles for a new document
#[utoipa::path(
    get,
    path = "/ai/outline",
    params(OutlineParams),
    responses(
        (status = 200, description = "Suggested outline (or the fallback outline if the provider failed)", body = OutlineResponse)
    )
)]
pub async fn suggest_outline_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OutlineParams>,
) -> Json<OutlineResponse> {
    let outline = state
        .oracle
        .suggest_outline(&params.topic, &params.doc_type)
        .await;
    Json(OutlineResponse { outline })
}
