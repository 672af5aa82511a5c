//! Route definitions for `/projects` and the nested link-page editor
//! resources (links, appearance, preview).

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{appearance, links, preview, projects};
use crate::state::AppState;

/// Project and editor routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list_projects
/// POST   /                          -> create_project
/// GET    /{id}                      -> get_project
/// PUT    /{id}                      -> update_project
/// DELETE /{id}                      -> delete_project
/// GET    /{id}/links                -> list_links
/// POST   /{id}/links                -> create_link
/// PUT    /{id}/links/order          -> reorder_links
/// PUT    /{id}/links/{link_id}      -> update_link
/// DELETE /{id}/links/{link_id}      -> delete_link
/// PATCH  /{id}/links/{link_id}/active -> toggle_link_active
/// GET    /{id}/appearance           -> get_appearance
/// PUT    /{id}/appearance           -> save_appearance
/// GET    /{id}/preview              -> get_preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/{id}/links",
            get(links::list_links).post(links::create_link),
        )
        // The literal `order` segment takes precedence over `{link_id}`.
        .route("/{id}/links/order", put(links::reorder_links))
        .route(
            "/{id}/links/{link_id}",
            put(links::update_link).delete(links::delete_link),
        )
        .route(
            "/{id}/links/{link_id}/active",
            patch(links::toggle_link_active),
        )
        .route(
            "/{id}/appearance",
            get(appearance::get_appearance).put(appearance::save_appearance),
        )
        .route("/{id}/preview", get(preview::get_preview))
}
