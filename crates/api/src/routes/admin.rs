//! Route definitions for the `/admin` dashboard actions.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /update_status  -> update_status
/// POST /comment        -> comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/update_status", post(admin::update_status))
        .route("/comment", post(admin::comment))
}
