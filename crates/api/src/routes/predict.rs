//! Route definition for repair-time estimation.

use axum::routing::post;
use axum::Router;

use crate::handlers::predict;
use crate::state::AppState;

/// Root-level estimation route.
///
/// ```text
/// POST /predict  -> predict
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/predict", post(predict::predict))
}
