//! Link entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use flowfolio_core::gateway::LinkRecord;
use flowfolio_core::types::{DbId, Timestamp};

/// A row from the `links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Link {
    pub id: DbId,
    pub project_id: DbId,
    /// Denormalized owner id; every query filters on it in addition to the
    /// project id.
    pub user_id: DbId,
    pub title: String,
    pub url: String,
    pub display_order: i32,
    pub is_active: bool,
    pub icon: Option<String>,
    /// Server-maintained counter; the editor never writes it.
    pub clicks: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Link> for LinkRecord {
    fn from(link: Link) -> Self {
        LinkRecord {
            id: link.id,
            title: link.title,
            url: link.url,
            display_order: link.display_order,
            is_active: link.is_active,
            icon: link.icon,
            clicks: link.clicks,
        }
    }
}

/// DTO for creating a new link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub project_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub url: String,
    pub display_order: i32,
    /// Defaults to true if omitted.
    pub is_active: Option<bool>,
    pub icon: Option<String>,
}

/// DTO for updating an existing link. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub title: Option<String>,
    pub url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub icon: Option<String>,
}
