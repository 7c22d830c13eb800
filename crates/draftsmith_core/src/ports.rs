//! crates/draftsmith_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use crate::domain::{Project, ProjectDraft, User, UserCredentials};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ProjectStore: Send + Sync {
    // --- User Management ---
    async fn create_user(&self, username: &str, password_hash: &str) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials>;

    // --- Project Management ---
    async fn get_projects(&self, user_id: i64) -> PortResult<Vec<Project>>;

    async fn create_project(&self, user_id: i64, draft: ProjectDraft) -> PortResult<Project>;

    /// Replaces title, main_topic, doc_type and the *entire* structure in one
    /// write. There is no merge of concurrent edits: the last writer wins.
    async fn update_project(&self, project_id: i64, draft: ProjectDraft) -> PortResult<()>;

    async fn get_project(&self, project_id: i64) -> PortResult<Project>;
}

/// The raw text-generation boundary: one prompt in, one completion out.
/// Implementations make a single round trip with no retry.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> PortResult<String>;
}

/// The content-generation contract the editor is built against.
///
/// None of these operations fail: provider errors are logged by the
/// implementation and degraded to fixed fallback values so the caller always
/// has something to render.
#[async_trait]
pub trait ContentGeneration: Send + Sync {
    /// Generates body text for one section of a document about `topic`.
    async fn generate_section_content(
        &self,
        topic: &str,
        section_title: &str,
        doc_type: &str,
    ) -> String;

    /// Rewrites `content` according to a free-form instruction. On provider
    /// failure the original content comes back unchanged.
    async fn refine_content(&self, content: &str, instruction: &str) -> String;

    /// Suggests an ordered list of section titles for a new document.
    async fn suggest_outline(&self, topic: &str, doc_type: &str) -> Vec<String>;
}
