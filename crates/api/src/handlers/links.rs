//! Handlers for the `/projects/{id}/links` resource: the link-page
//! editor's persistence surface. Create and update run the same validation
//! pass as the dialog; the reorder endpoint takes the full desired id
//! sequence and persists the renumbering transactionally.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use flowfolio_core::error::CoreError;
use flowfolio_core::form::{validate_link_form, LinkForm, LinkFormErrors};
use flowfolio_core::gateway::LinkRecord;
use flowfolio_core::order;
use flowfolio_core::types::DbId;

use flowfolio_db::models::link::{CreateLink, Link, UpdateLink};
use flowfolio_db::repositories::LinkRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::require_link_page;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST .../links` and `PUT .../links/{link_id}`.
#[derive(Debug, Deserialize)]
pub struct LinkFormRequest {
    pub title: String,
    pub url: String,
    /// Defaults to true on create.
    pub is_active: Option<bool>,
    /// Omitted on update means "preserve the existing icon".
    pub icon: Option<String>,
}

/// Request body for `PATCH .../links/{link_id}/active`.
#[derive(Debug, Deserialize)]
pub struct ToggleActiveRequest {
    pub is_active: bool,
}

/// Request body for `PUT .../links/order`: the complete desired id
/// sequence, a permutation of the project's current link ids.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ordered_ids: Vec<DbId>,
}

/// GET /api/v1/projects/{id}/links
///
/// The project's links, `display_order` ascending.
pub async fn list_links(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Link>>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;
    let links = LinkRepo::list_for_project(&state.pool, project.id, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/projects/{id}/links
///
/// Create a link at the end of the list (`display_order = max + 1`).
pub async fn create_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<LinkFormRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Link>>)> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let form = LinkForm {
        title: input.title,
        url: input.url,
        is_active: input.is_active.unwrap_or(true),
        icon: input.icon,
    };
    let valid = validate_link_form(&form).map_err(|e| AppError::FieldErrors(form_errors(&e)))?;

    let display_order =
        LinkRepo::next_display_order(&state.pool, project.id, auth_user.user_id).await?;

    let link = LinkRepo::create(
        &state.pool,
        &CreateLink {
            project_id: project.id,
            user_id: auth_user.user_id,
            title: valid.title,
            url: valid.url,
            display_order,
            is_active: Some(valid.is_active),
            icon: valid.icon,
        },
    )
    .await?;

    tracing::info!(link_id = link.id, project_id = project.id, "Link created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/projects/{id}/links/{link_id}
///
/// Update a link from the dialog form. `display_order` is always
/// preserved, and the icon too when the body omits it.
pub async fn update_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, link_id)): Path<(DbId, DbId)>,
    Json(input): Json<LinkFormRequest>,
) -> AppResult<Json<DataResponse<Link>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let form = LinkForm {
        title: input.title,
        url: input.url,
        is_active: input.is_active.unwrap_or(true),
        icon: input.icon,
    };
    let valid = validate_link_form(&form).map_err(|e| AppError::FieldErrors(form_errors(&e)))?;

    let link = LinkRepo::update(
        &state.pool,
        link_id,
        project.id,
        auth_user.user_id,
        &UpdateLink {
            title: Some(valid.title),
            url: Some(valid.url),
            is_active: Some(valid.is_active),
            icon: valid.icon,
            display_order: None,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "link",
        id: link_id,
    }))?;

    Ok(Json(DataResponse { data: link }))
}

/// PATCH /api/v1/projects/{id}/links/{link_id}/active
///
/// Single-field active toggle, the persistence half of the editor's
/// optimistic flip.
pub async fn toggle_link_active(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, link_id)): Path<(DbId, DbId)>,
    Json(input): Json<ToggleActiveRequest>,
) -> AppResult<Json<DataResponse<Link>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let link = LinkRepo::update(
        &state.pool,
        link_id,
        project.id,
        auth_user.user_id,
        &UpdateLink {
            is_active: Some(input.is_active),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "link",
        id: link_id,
    }))?;

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/projects/{id}/links/{link_id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, link_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let deleted = LinkRepo::delete(&state.pool, link_id, project.id, auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "link",
            id: link_id,
        }));
    }

    tracing::info!(link_id, project_id = project.id, "Link deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/links/order
///
/// Persist a drag-reorder. The body must be an exact permutation of the
/// project's link ids; every row is renumbered to its zero-based position
/// in one transaction, so a concurrent deletion fails the whole batch.
pub async fn reorder_links(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Link>>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let current = LinkRepo::list_for_project(&state.pool, project.id, auth_user.user_id).await?;
    let records: Vec<LinkRecord> = current.into_iter().map(LinkRecord::from).collect();

    let plan = order::plan_permutation(&records, &input.ordered_ids).map_err(AppError::Core)?;

    if !plan.changes.is_empty() {
        LinkRepo::update_order_bulk(&state.pool, project.id, auth_user.user_id, &plan.changes)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => AppError::Core(CoreError::Conflict(
                    "The link list changed while reordering; reload and try again".into(),
                )),
                other => other.into(),
            })?;

        tracing::info!(
            project_id = project.id,
            changed = plan.changes.len(),
            "Links reordered",
        );
    }

    let links = LinkRepo::list_for_project(&state.pool, project.id, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// Convert field errors into the `fields` object of the error envelope.
fn form_errors(errors: &LinkFormErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    if let Some(msg) = &errors.title {
        fields.insert("title".into(), json!(msg));
    }
    if let Some(msg) = &errors.url {
        fields.insert("url".into(), json!(msg));
    }
    if let Some(msg) = &errors.icon {
        fields.insert("icon".into(), json!(msg));
    }
    fields.into()
}
