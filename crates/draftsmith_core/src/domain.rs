//! crates/draftsmith_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs double as the wire/storage schema: a project's `structure`
//! is persisted as a JSON blob with exactly this shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    #[default]
    Pending,
    Generating,
    Done,
    Error,
}

/// Reader feedback attached to a section. Both fields are optional and
/// omitted from the serialized form when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One prior content variant produced by a refine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    pub prompt: String,
    #[serde(rename = "generatedContent")]
    pub generated_content: String,
    pub timestamp: DateTime<Utc>,
}

/// One titled content block within a project. The `id` is client-generated
/// and unique within its project; `content` may be empty before generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub refinements: Vec<Refinement>,
    #[serde(default)]
    pub feedback: Feedback,
    #[serde(default)]
    pub status: SectionStatus,
}

/// A user-owned unit of work. Section order in `structure` is meaningful:
/// it is the heading/slide order of the exported artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub main_topic: String,
    pub doc_type: String,
    pub structure: Vec<Section>,
    pub owner_id: i64,
}

/// The payload used to create a project or replace one wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub main_topic: String,
    pub doc_type: String,
    pub structure: Vec<Section>,
}

// Represents a user - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
}

// Only used internally for login/register - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_defaults_apply_to_sparse_json() {
        let section: Section =
            serde_json::from_str(r#"{"id": "s1", "title": "Intro"}"#).unwrap();
        assert_eq!(section.content, "");
        assert!(section.refinements.is_empty());
        assert_eq!(section.feedback, Feedback::default());
        assert_eq!(section.status, SectionStatus::Pending);
    }

    #[test]
    fn section_status_serializes_lowercase() {
        let json = serde_json::to_string(&SectionStatus::Generating).unwrap();
        assert_eq!(json, r#""generating""#);
        let status: SectionStatus = serde_json::from_str(r#""done""#).unwrap();
        assert_eq!(status, SectionStatus::Done);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<SectionStatus>(r#""finished""#).is_err());
    }

    #[test]
    fn empty_feedback_serializes_to_empty_object() {
        let json = serde_json::to_string(&Feedback::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn refinement_round_trips_with_camel_case_content_key() {
        let refinement = Refinement {
            prompt: "shorter".to_string(),
            generated_content: "Trimmed text".to_string(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&refinement).unwrap();
        assert!(json.contains(r#""generatedContent":"Trimmed text""#));
        let back: Refinement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, refinement);
    }
}
