use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Per-request ownership scope lives in the extractors and
/// handlers, never here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flowfolio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
