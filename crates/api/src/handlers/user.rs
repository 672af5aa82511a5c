//! Handlers for the `/user` resource: profile settings, password change,
//! and account deletion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use flowfolio_core::error::CoreError;
use flowfolio_core::form::is_valid_link_url;

use flowfolio_db::models::user::{UpdateProfile, UserResponse};
use flowfolio_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /user/profile`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Request body for `PUT /user/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `DELETE /user/account`. The password re-check makes
/// account deletion an explicit two-step confirmation.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// PUT /api/v1/user/profile
///
/// Update display name and/or avatar URL. Omitted fields are preserved.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let mut fields = serde_json::Map::new();
    if let Some(name) = &input.full_name {
        if name.trim().chars().count() < 2 {
            fields.insert(
                "full_name".into(),
                json!("Full name must be at least 2 characters long."),
            );
        }
    }
    if let Some(url) = &input.avatar_url {
        if !is_valid_link_url(url) {
            fields.insert("avatar_url".into(), json!("Avatar URL must be a valid http(s) URL."));
        }
    }
    if !fields.is_empty() {
        return Err(AppError::FieldErrors(fields.into()));
    }

    let update = UpdateProfile {
        full_name: input.full_name.map(|n| n.trim().to_string()),
        avatar_url: input.avatar_url,
    };

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/user/password
///
/// Change the password for the authenticated user. The current password is
/// verified first.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/user/account
///
/// Permanently delete the account after a password confirmation. Projects,
/// links, and sessions cascade.
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Password is incorrect".into(),
        )));
    }

    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
    UserRepo::delete(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}
