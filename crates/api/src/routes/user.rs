//! Route definitions for the `/user` resource (account settings).

use axum::routing::{delete, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Account settings routes mounted at `/user`.
///
/// ```text
/// PUT    /profile   -> update_profile
/// PUT    /password  -> change_password
/// DELETE /account   -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", put(user::update_profile))
        .route("/password", put(user::change_password))
        .route("/account", delete(user::delete_account))
}
