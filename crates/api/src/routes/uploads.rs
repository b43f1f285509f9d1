//! Route definitions for stored attachments.

use axum::routing::get;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Root-level upload routes.
///
/// ```text
/// GET /uploads/{reference}  -> serve
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/uploads/{reference}", get(uploads::serve))
}
