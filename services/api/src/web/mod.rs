//! services/api/src/web/mod.rs
//!
//! The Axum handler modules and the master definition for the OpenAPI
//! specification.

pub mod ai;
pub mod auth;
pub mod export;
pub mod projects;
pub mod state;

use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        projects::list_projects_handler,
        projects::create_project_handler,
        projects::update_project_handler,
        ai::generate_content_handler,
        ai::refine_content_handler,
        ai::suggest_outline_handler,
        export::export_project_handler,
    ),
    components(schemas(
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::UserOut,
        auth::LoginResponse,
        projects::ProjectPayload,
        projects::ProjectOut,
        projects::UpdateResponse,
        ai::GenerateRequest,
        ai::RefineRequest,
        ai::ContentResponse,
        ai::OutlineResponse,
    )),
    tags(
        (name = "Draftsmith API", description = "API endpoints for the AI document-authoring assistant.")
    )
)]
pub struct ApiDoc;
