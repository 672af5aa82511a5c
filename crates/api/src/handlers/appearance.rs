//! Handlers for a link page's appearance settings.
//!
//! GET returns the stored blob shallow-merged over defaults (the editor's
//! working copy plus the fully resolved values). PUT overwrites the whole
//! blob -- there is no field-level diffing, so the saved object becomes
//! the new baseline.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use flowfolio_core::appearance::{AppearanceSettings, ResolvedAppearance};
use flowfolio_core::gateway::AppearanceStore;
use flowfolio_core::types::DbId;

use flowfolio_db::gateway::PgLinkGateway;

use crate::error::AppResult;
use crate::handlers::projects::require_link_page;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload: the working copy and its resolved form.
#[derive(Debug, Serialize)]
pub struct AppearanceResponse {
    pub settings: AppearanceSettings,
    pub resolved: ResolvedAppearance,
}

/// GET /api/v1/projects/{id}/appearance
pub async fn get_appearance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<AppearanceResponse>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let settings = AppearanceSettings::from_stored(project.appearance_settings.as_ref());
    let resolved = settings.resolve();

    Ok(Json(DataResponse {
        data: AppearanceResponse { settings, resolved },
    }))
}

/// PUT /api/v1/projects/{id}/appearance
///
/// Overwrite the appearance blob with the submitted settings object.
pub async fn save_appearance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(settings): Json<AppearanceSettings>,
) -> AppResult<Json<DataResponse<AppearanceResponse>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    // Request-scoped gateway carrying the owner scope; the editor's save
    // path and this endpoint persist through the same seam.
    let gateway = PgLinkGateway::new(state.pool.clone(), project.id, auth_user.user_id);
    gateway.save_appearance(&settings.to_stored()).await?;

    tracing::info!(project_id = project.id, "Appearance settings saved");

    let resolved = settings.resolve();
    Ok(Json(DataResponse {
        data: AppearanceResponse { settings, resolved },
    }))
}
