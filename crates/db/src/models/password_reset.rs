//! Password reset token model.

use sqlx::FromRow;

use flowfolio_core::types::{DbId, Timestamp};

/// A row from the `password_reset_tokens` table. Only the SHA-256 hash of
/// the token is stored; the plaintext goes to the user out of band.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
