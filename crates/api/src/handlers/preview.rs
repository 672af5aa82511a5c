//! Handler for the editor's live preview: the pure render model of the
//! page as it would appear publicly, including inactive-link filtering and
//! derived contrast colors.

use axum::extract::{Path, State};
use axum::Json;

use flowfolio_core::appearance::AppearanceSettings;
use flowfolio_core::gateway::LinkRecord;
use flowfolio_core::preview::{self, PreviewPage};
use flowfolio_core::types::DbId;

use flowfolio_db::repositories::LinkRepo;

use crate::error::AppResult;
use crate::handlers::projects::require_link_page;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/preview
pub async fn get_preview(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PreviewPage>>> {
    let project = require_link_page(&state, project_id, auth_user.user_id).await?;

    let links: Vec<LinkRecord> =
        LinkRepo::list_for_project(&state.pool, project.id, auth_user.user_id)
            .await?
            .into_iter()
            .map(LinkRecord::from)
            .collect();
    let settings = AppearanceSettings::from_stored(project.appearance_settings.as_ref());

    let page = preview::render(&project.title, &links, &settings);

    Ok(Json(DataResponse { data: page }))
}
