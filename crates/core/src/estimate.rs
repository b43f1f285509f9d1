//! Repair-time estimation: heuristic table, prompt construction, and the
//! parsing of model replies into a tagged outcome.
//!
//! Everything here is pure; the network call lives in the estimator crate.
//! The heuristic is the always-available fallback, so a misconfigured or
//! unreachable model backend degrades the feature instead of breaking it.

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// System message sent with every estimation request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that estimates repair fix times \
     for campus maintenance issues. Provide a JSON response only.";

/// Build the user prompt for one estimation request.
///
/// The closing sentence names the exact keys the reply must carry; replies
/// that do not match that shape degrade to a raw-text outcome.
pub fn build_prompt(
    title: &str,
    description: &str,
    location: &str,
    severity: &str,
    now: Timestamp,
) -> String {
    format!(
        "Issue title: {title}\nDescription: {description}\nLocation: {location}\n\
         Severity: {severity}\nCurrent UTC: {}\n\n\
         Estimate how many days it will take to fix this problem and probable \
         date/time (ISO 8601). Return JSON: {{estimated_days, estimated_fix_iso, \
         confidence, rationale}}.",
        now.to_rfc3339()
    )
}

// ---------------------------------------------------------------------------
// Estimate types
// ---------------------------------------------------------------------------

/// A structured repair-time estimate. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Estimate {
    pub estimated_days: f64,
    pub estimated_fix_iso: String,
    pub confidence: f64,
    pub rationale: String,
}

/// Result of one estimation attempt.
///
/// `Structured` is a reply (or fallback) matching the [`Estimate`] shape;
/// `RawText` is a model reply that produced no usable JSON; `BackendFailure`
/// is a transport or API error talking to the model backend.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateOutcome {
    Structured(Estimate),
    RawText(String),
    BackendFailure(String),
}

// ---------------------------------------------------------------------------
// Heuristic fallback
// ---------------------------------------------------------------------------

/// Days-to-fix and confidence by severity band (case-insensitive):
/// critical/high => (1, 0.7), medium/normal => (3, 0.6),
/// low/minor => (7, 0.5), anything else => (4, 0.5).
pub fn heuristic_estimate(severity: &str) -> (f64, f64) {
    match severity.trim().to_lowercase().as_str() {
        "critical" | "high" => (1.0, 0.7),
        "medium" | "normal" => (3.0, 0.6),
        "low" | "minor" => (7.0, 0.5),
        _ => (4.0, 0.5),
    }
}

/// Deterministic estimate from the severity band alone. The projected fix
/// time is `now` plus the band's day count.
pub fn fallback_estimate(severity: &str, now: Timestamp) -> Estimate {
    let (days, confidence) = heuristic_estimate(severity);
    let fix_at = now + chrono::Duration::days(days as i64);
    Estimate {
        estimated_days: days,
        estimated_fix_iso: fix_at.to_rfc3339(),
        confidence,
        rationale: format!("Fallback heuristic: severity='{severity}' => {days} days"),
    }
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Extract a JSON value from a model reply.
///
/// A reply that starts with `{` must parse as a whole; otherwise the span
/// from the first `{` to the last `}` is tried. Anything unparseable is
/// `None` rather than an error.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).ok();
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start > end {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Classify a model reply: JSON matching the [`Estimate`] shape becomes
/// `Structured`, everything else degrades to `RawText`.
pub fn parse_llm_reply(text: &str) -> EstimateOutcome {
    match extract_json(text).and_then(|value| serde_json::from_value::<Estimate>(value).ok()) {
        Some(estimate) => EstimateOutcome::Structured(estimate),
        None => EstimateOutcome::RawText(text.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
