//! Route definitions for the public `/pages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Public page routes mounted at `/pages`. No authentication.
///
/// ```text
/// GET  /{slug}                         -> get_page
/// POST /{slug}/links/{link_id}/click   -> record_click
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(public::get_page))
        .route("/{slug}/links/{link_id}/click", post(public::record_click))
}
