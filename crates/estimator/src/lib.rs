//! Repair-time estimation service.
//!
//! When a chat backend is configured the estimate comes from the model;
//! without one, and whenever the call fails, the service degrades to the
//! deterministic severity heuristic or a tagged failure. Callers always
//! receive an [`EstimateOutcome`], never an error.

pub mod api;

use fixtrack_core::estimate::{
    build_prompt, fallback_estimate, parse_llm_reply, EstimateOutcome, SYSTEM_PROMPT,
};

pub use api::{ChatApi, ChatApiError};

/// One estimation request. `severity` is free text; unrecognized values
/// land in the heuristic's catch-all band.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub severity: String,
}

/// Estimation service, built once at startup.
pub struct Estimator {
    backend: Option<ChatApi>,
    model: String,
}

impl Estimator {
    /// Service with a live chat backend.
    pub fn with_backend(backend: ChatApi, model: String) -> Self {
        Self {
            backend: Some(backend),
            model,
        }
    }

    /// Heuristic-only service, for when estimation is disabled or no
    /// credential is configured.
    pub fn heuristic_only() -> Self {
        Self {
            backend: None,
            model: String::new(),
        }
    }

    /// Whether a chat backend is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Produce an estimate for one request.
    ///
    /// The backend is tried at most once, bounded by the client timeout.
    /// A transport or API failure becomes `BackendFailure`; a reply
    /// without usable JSON becomes `RawText`; no backend at all falls
    /// back to the severity heuristic.
    pub async fn estimate(&self, request: &EstimateRequest) -> EstimateOutcome {
        let now = chrono::Utc::now();

        let Some(backend) = &self.backend else {
            tracing::debug!(severity = %request.severity, "No chat backend, using heuristic");
            return EstimateOutcome::Structured(fallback_estimate(&request.severity, now));
        };

        let prompt = build_prompt(
            &request.title,
            &request.description,
            &request.location,
            &request.severity,
            now,
        );

        match backend.complete(&self.model, SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let outcome = parse_llm_reply(&reply);
                if matches!(outcome, EstimateOutcome::RawText(_)) {
                    tracing::warn!("Chat reply carried no parseable estimate, returning raw text");
                }
                outcome
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chat backend call failed");
                EstimateOutcome::BackendFailure(err.to_string())
            }
        }
    }
}
