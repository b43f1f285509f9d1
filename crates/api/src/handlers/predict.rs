//! Handler for repair-time estimation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fixtrack_core::estimate::EstimateOutcome;
use fixtrack_estimator::EstimateRequest;
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

/// JSON body for an estimation request. `severity` defaults to `medium`,
/// matching the form's preselected option.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_severity")]
    pub severity: String,
}

fn default_severity() -> String {
    "medium".to_string()
}

/// POST /predict
///
/// Responds by outcome: a structured estimate as-is, unparseable model
/// output as `{"raw": text}`, and a failed backend call as a 500 carrying
/// the underlying error message. Estimates are never persisted.
pub async fn predict(State(state): State<AppState>, Json(body): Json<PredictRequest>) -> Response {
    let request = EstimateRequest {
        title: body.title,
        description: body.description,
        location: body.location,
        severity: body.severity,
    };

    match state.estimator.estimate(&request).await {
        EstimateOutcome::Structured(estimate) => Json(estimate).into_response(),
        EstimateOutcome::RawText(text) => Json(json!({ "raw": text })).into_response(),
        EstimateOutcome::BackendFailure(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "LLM call failed", "exception": message })),
        )
            .into_response(),
    }
}
