//! Public, unauthenticated handlers: the rendered page model for a
//! published slug and the click counter.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use flowfolio_core::appearance::AppearanceSettings;
use flowfolio_core::error::CoreError;
use flowfolio_core::form::ProjectType;
use flowfolio_core::gateway::LinkRecord;
use flowfolio_core::preview::{self, PreviewPage};
use flowfolio_core::types::DbId;

use flowfolio_db::models::project::Project;
use flowfolio_db::repositories::{LinkRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pages/{slug}
///
/// The render model for a published link page. Drafts and Website projects
/// are indistinguishable from missing pages.
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<PreviewPage>>> {
    let project = require_published_page(&state, &slug).await?;

    let links: Vec<LinkRecord> =
        LinkRepo::list_for_project(&state.pool, project.id, project.user_id)
            .await?
            .into_iter()
            .map(LinkRecord::from)
            .collect();
    let settings = AppearanceSettings::from_stored(project.appearance_settings.as_ref());

    let page = preview::render(&project.title, &links, &settings);

    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/pages/{slug}/links/{link_id}/click
///
/// Count a click on a public page. Only links that belong to the page and
/// are active count; anything else is a 404.
pub async fn record_click(
    State(state): State<AppState>,
    Path((slug, link_id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let project = require_published_page(&state, &slug).await?;

    // The link must belong to this page; a bare link id is not enough.
    let link = LinkRepo::find_by_id(&state.pool, link_id, project.id, project.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "link",
            id: link_id,
        }))?;

    let counted = LinkRepo::record_click(&state.pool, link.id).await?;
    if !counted {
        // Inactive links are hidden from the page; clicking one is a stale
        // request.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "link",
            id: link_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a slug to a published Link Page project, or 404.
async fn require_published_page(state: &AppState, slug: &str) -> AppResult<Project> {
    let project = ProjectRepo::find_by_slug(&state.pool, slug)
        .await?
        .filter(|p| {
            p.status == "Published"
                && ProjectType::parse(&p.project_type) == Some(ProjectType::LinkPage)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "page",
            id: 0,
        }))?;
    Ok(project)
}
