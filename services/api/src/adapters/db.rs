//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ProjectStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use draftsmith_core::domain::{Project, ProjectDraft, Section, User, UserCredentials};
use draftsmith_core::ports::{PortError, PortResult, ProjectStore};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ProjectStore` port.
#[derive(Clone)]
pub struct PgStoreAdapter {
    pool: PgPool,
}

impl PgStoreAdapter {
    /// Creates a new `PgStoreAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    username: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            username: self.username,
        }
    }
}

#[derive(FromRow)]
struct UserCredentialsRecord {
    id: i64,
    username: String,
    password_hash: String,
}
impl UserCredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct ProjectRecord {
    id: i64,
    title: String,
    main_topic: String,
    doc_type: String,
    structure: Json<Vec<Section>>,
    owner_id: i64,
}
impl ProjectRecord {
    fn to_domain(self) -> Project {
        Project {
            id: self.id,
            title: self.title,
            main_topic: self.main_topic,
            doc_type: self.doc_type,
            structure: self.structure.0,
            owner_id: self.owner_id,
        }
    }
}

//=========================================================================================
// `ProjectStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProjectStore for PgStoreAdapter {
    async fn create_user(&self, username: &str, password_hash: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, UserCredentialsRecord>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("User '{}' not found", username))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn get_projects(&self, user_id: i64) -> PortResult<Vec<Project>> {
        let records = sqlx::query_as::<_, ProjectRecord>(
            "SELECT id, title, main_topic, doc_type, structure, owner_id \
             FROM projects WHERE owner_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let projects = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(projects)
    }

    async fn create_project(&self, user_id: i64, draft: ProjectDraft) -> PortResult<Project> {
        let record = sqlx::query_as::<_, ProjectRecord>(
            "INSERT INTO projects (title, main_topic, doc_type, structure, owner_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, main_topic, doc_type, structure, owner_id",
        )
        .bind(&draft.title)
        .bind(&draft.main_topic)
        .bind(&draft.doc_type)
        .bind(Json(&draft.structure))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn update_project(&self, project_id: i64, draft: ProjectDraft) -> PortResult<()> {
        // The whole row is replaced in one statement: title, topic, type and
        // the full structure blob. The last writer wins.
        let result = sqlx::query(
            "UPDATE projects \
             SET title = $1, main_topic = $2, doc_type = $3, structure = $4, updated_at = now() \
             WHERE id = $5",
        )
        .bind(&draft.title)
        .bind(&draft.main_topic)
        .bind(&draft.doc_type)
        .bind(Json(&draft.structure))
        .bind(project_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }
        Ok(())
    }

    async fn get_project(&self, project_id: i64) -> PortResult<Project> {
        let record = sqlx::query_as::<_, ProjectRecord>(
            "SELECT id, title, main_topic, doc_type, structure, owner_id \
             FROM projects WHERE id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Project {} not found", project_id))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }
}
