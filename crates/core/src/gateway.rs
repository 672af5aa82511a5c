//! Seam between the link editor and the remote relational store.
//!
//! The editor state machine ([`crate::editor`]) only ever talks to the store
//! through [`LinkGateway`], so it can be driven in tests by an in-memory
//! double. The production implementation lives in `flowfolio-db` and scopes
//! every statement by owning project *and* user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A link row as the editor sees it, ordered by `display_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub display_order: i32,
    pub is_active: bool,
    pub icon: Option<String>,
    /// Server-maintained click counter; read-only from the editor.
    pub clicks: i32,
}

/// Fields for inserting a new link. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub display_order: i32,
    pub is_active: bool,
    pub icon: Option<String>,
}

/// Partial update for an existing link. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub icon: Option<String>,
}

/// Failures crossing the gateway boundary. The gateway never retries;
/// callers decide how to reconcile.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The store rejected the operation or the transport failed.
    #[error("remote store error: {0}")]
    Remote(String),

    /// The target row no longer exists (or is not visible to this owner).
    #[error("link {0} no longer exists")]
    NotFound(DbId),

    /// Owner mismatch. Surfaced as a hard failure, never retried.
    #[error("not authorized for this project")]
    Unauthorized,
}

/// Data access for the `links` of one project, on behalf of one owner.
///
/// Implementations are request-scoped: one instance per open editor, carrying
/// the `(project_id, user_id)` scope it was constructed with.
#[async_trait]
pub trait LinkGateway: Send + Sync {
    /// Full list for the project, `display_order` ascending.
    async fn list(&self) -> Result<Vec<LinkRecord>, GatewayError>;

    /// Insert a new link, returning the stored row.
    async fn insert(&self, link: &NewLink) -> Result<LinkRecord, GatewayError>;

    /// Apply a partial update to one link.
    async fn update(&self, id: DbId, patch: &LinkPatch) -> Result<LinkRecord, GatewayError>;

    /// Persist a batch of `(id, display_order)` assignments atomically.
    /// A missing row fails the whole batch.
    async fn update_order(&self, changes: &[(DbId, i32)]) -> Result<(), GatewayError>;

    /// Delete one link.
    async fn delete(&self, id: DbId) -> Result<(), GatewayError>;
}

/// Persistence for a project's appearance blob (whole-object overwrite).
#[async_trait]
pub trait AppearanceStore: Send + Sync {
    async fn save_appearance(&self, settings: &serde_json::Value) -> Result<(), GatewayError>;
}
