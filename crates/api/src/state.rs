use std::sync::Arc;

use crate::config::ServerConfig;
use crate::labels::LabelRenderer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bazaar_db::DbPool,
    /// Server configuration (session lifetime is read by the login handler).
    pub config: Arc<ServerConfig>,
    /// Produces the label document for `POST /sellers/{id}/labels`.
    pub label_renderer: Arc<dyn LabelRenderer>,
}
