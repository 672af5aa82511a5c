pub mod auth;
pub mod health;
pub mod pages;
pub mod projects;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                        create account (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
/// /auth/forgot-password               issue reset token (public)
/// /auth/reset-password                consume reset token (public)
/// /auth/me                            current user (requires auth)
///
/// /user/profile                       update profile (PUT)
/// /user/password                      change password (PUT)
/// /user/account                       delete account (DELETE)
///
/// /projects                           list, create
/// /projects/{id}                      get, update, delete
/// /projects/{id}/links                list, create
/// /projects/{id}/links/order          bulk reorder (PUT)
/// /projects/{id}/links/{link_id}          update, delete
/// /projects/{id}/links/{link_id}/active   toggle (PATCH)
/// /projects/{id}/appearance           get, save (PUT)
/// /projects/{id}/preview              render model (GET)
///
/// /pages/{slug}                       public page render model (GET)
/// /pages/{slug}/links/{link_id}/click count a click (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/projects", projects::router())
        .nest("/pages", pages::router())
}
