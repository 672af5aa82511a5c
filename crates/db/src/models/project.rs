//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use flowfolio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
///
/// `project_type` and `status` are the stored strings (`"Link Page"` /
/// `"Website"`, `"Draft"` / `"Published"`); the database CHECK constraints
/// and core form validation keep them in range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub project_type: String,
    pub status: String,
    /// Public address of the page, unique across all projects.
    pub slug: String,
    /// Opaque appearance blob owned by the link-page editor.
    pub appearance_settings: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Status defaults to Draft.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: DbId,
    pub title: String,
    pub project_type: String,
    pub slug: String,
}

/// DTO for updating an existing project. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub status: Option<String>,
    pub slug: Option<String>,
}
