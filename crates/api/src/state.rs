use std::sync::Arc;

use fixtrack_estimator::Estimator;

use crate::config::ServerConfig;
use crate::media::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fixtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Attachment storage.
    pub media: Arc<MediaStore>,
    /// Repair-time estimation service.
    pub estimator: Arc<Estimator>,
}
