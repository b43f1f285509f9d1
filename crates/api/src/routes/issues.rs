//! Route definitions for issue reporting and browsing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Root-level issue routes.
///
/// ```text
/// POST /submit                 -> submit
/// GET  /issues                 -> list
/// GET  /issue/{id}             -> detail
/// GET  /api/issue_status/{id}  -> issue_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(issues::submit))
        .route("/issues", get(issues::list))
        .route("/issue/{id}", get(issues::detail))
        .route("/api/issue_status/{id}", get(issues::issue_status))
}
