use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// There is no other in-process shared mutable state; all coordination between
/// requests goes through the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskforge_db::DbPool,
    /// Server configuration (bind address, CORS, token policies).
    pub config: Arc<ServerConfig>,
}
