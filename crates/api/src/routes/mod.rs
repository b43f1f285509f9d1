pub mod admin;
pub mod health;
pub mod issues;
pub mod predict;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// All paths are root-level, matching the surface the reporting front-end
/// and the admin dashboard were built against:
///
/// ```text
/// POST /submit                      report an issue (multipart form)
/// GET  /issues                      list issues (?status=&category=&q=)
/// GET  /issue/{id}                  issue detail with history
/// GET  /api/issue_status/{id}       status poll (bare JSON)
///
/// POST /admin/update_status         change status (JSON)
/// POST /admin/comment               append a comment (urlencoded form)
///
/// GET  /uploads/{reference}         stream a stored attachment
///
/// POST /predict                     repair-time estimate (JSON)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Issue reporting and browsing.
        .merge(issues::router())
        // Status changes and comments.
        .nest("/admin", admin::router())
        // Stored attachments.
        .merge(uploads::router())
        // Repair-time estimation.
        .merge(predict::router())
}
