//! Handlers for the `/projects` resource: the dashboard listing and
//! project CRUD. Ownership is enforced by querying with the authenticated
//! user id; a foreign project id behaves exactly like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use flowfolio_core::error::CoreError;
use flowfolio_core::form::{validate_project_form, ProjectType};
use flowfolio_core::slug::slugify;
use flowfolio_core::types::DbId;

use flowfolio_db::models::project::{CreateProject, Project, UpdateProject};
use flowfolio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub project_type: String,
}

/// Request body for `PUT /projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub status: Option<String>,
}

/// GET /api/v1/projects
///
/// List the authenticated user's projects, most recently updated first.
pub async fn list_projects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// Create a project. The public slug is derived from the title; a taken
/// slug gets one retry with a random suffix before surfacing the conflict.
pub async fn create_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let form = validate_project_form(&input.title, &input.project_type).map_err(|errors| {
        let mut fields = serde_json::Map::new();
        if let Some(msg) = errors.title {
            fields.insert("title".into(), json!(msg));
        }
        if let Some(msg) = errors.project_type {
            fields.insert("project_type".into(), json!(msg));
        }
        AppError::FieldErrors(fields.into())
    })?;

    let slug = slugify(&form.title);
    let create = CreateProject {
        user_id: auth_user.user_id,
        title: form.title.clone(),
        project_type: form.project_type.as_str().to_string(),
        slug: slug.clone(),
    };

    let project = match ProjectRepo::create(&state.pool, &create).await {
        Ok(project) => project,
        Err(err) if is_slug_conflict(&err) => {
            let retry = CreateProject {
                slug: format!("{slug}-{}", rand::rng().random_range(1000..10000)),
                ..create
            };
            ProjectRepo::create(&state.pool, &retry).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        project_id = project.id,
        user_id = auth_user.user_id,
        project_type = %project.project_type,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = require_project(&state, id, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Update title and/or status. A title change regenerates the slug.
pub async fn update_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let mut update = UpdateProject::default();

    if let Some(title) = &input.title {
        // Reuse the creation rules for the new title; the type is fixed.
        let form = validate_project_form(title, "Link Page").map_err(|errors| {
            let mut fields = serde_json::Map::new();
            if let Some(msg) = errors.title {
                fields.insert("title".into(), json!(msg));
            }
            AppError::FieldErrors(fields.into())
        })?;
        update.slug = Some(slugify(&form.title));
        update.title = Some(form.title);
    }

    if let Some(status) = &input.status {
        if status != "Draft" && status != "Published" {
            return Err(AppError::Core(CoreError::Validation(
                "Status must be 'Draft' or 'Published'".into(),
            )));
        }
        update.status = Some(status.clone());
    }

    let project = ProjectRepo::update(&state.pool, id, auth_user.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Delete a project; its links cascade. Returns 204.
pub async fn delete_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }));
    }

    tracing::info!(project_id = id, user_id = auth_user.user_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fetch a project scoped to its owner, or 404.
pub(crate) async fn require_project(
    state: &AppState,
    id: DbId,
    user_id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))
}

/// Fetch an owner-scoped project and require it to be a Link Page; the
/// editor endpoints have no meaning for Website projects.
pub(crate) async fn require_link_page(
    state: &AppState,
    id: DbId,
    user_id: DbId,
) -> AppResult<Project> {
    let project = require_project(state, id, user_id).await?;
    if ProjectType::parse(&project.project_type) != Some(ProjectType::LinkPage) {
        return Err(AppError::BadRequest(
            "This operation is only available for Link Page projects".into(),
        ));
    }
    Ok(project)
}

/// `true` when the error is the `uq_projects_slug` unique violation.
fn is_slug_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_projects_slug")
        }
        _ => false,
    }
}
