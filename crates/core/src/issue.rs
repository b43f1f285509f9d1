//! Issue vocabulary, validation, and history-line conventions.
//!
//! Status and urgency values are stored as canonical strings in the
//! `issues` table; the constants here are the single source of truth for
//! both the API layer and the repository tests.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status of every new issue.
pub const STATUS_REPORTED: &str = "Reported";

/// Work has started.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// The underlying problem is fixed.
pub const STATUS_RESOLVED: &str = "Resolved";

/// Administratively closed.
pub const STATUS_CLOSED: &str = "Closed";

/// All recognized status values. There is no transition graph: any status
/// may follow any other, closed issues included.
pub const ISSUE_STATUSES: &[&str] = &[
    STATUS_REPORTED,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

// ---------------------------------------------------------------------------
// Urgency constants
// ---------------------------------------------------------------------------

pub const URGENCY_LOW: &str = "Low";
pub const URGENCY_NORMAL: &str = "Normal";
pub const URGENCY_HIGH: &str = "High";
pub const URGENCY_CRITICAL: &str = "Critical";

/// Recognized urgency levels, mildest first.
pub const URGENCY_LEVELS: &[&str] =
    &[URGENCY_LOW, URGENCY_NORMAL, URGENCY_HIGH, URGENCY_CRITICAL];

// ---------------------------------------------------------------------------
// Category constants
// ---------------------------------------------------------------------------

/// Catch-all category for submissions that leave the field blank.
pub const CATEGORY_OTHER: &str = "Other";

/// Categories offered by the submission form. The set is extensible:
/// unknown non-empty categories are stored verbatim.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Electrical",
    "Plumbing",
    "Carpentry",
    "Cleaning",
    "IT",
    CATEGORY_OTHER,
];

// ---------------------------------------------------------------------------
// History vocabulary
// ---------------------------------------------------------------------------

/// Actor recorded on the history entry written at creation time.
pub const ACTOR_REPORTER: &str = "Reporter";

/// Action of the history entry written at creation time.
pub const ACTION_REPORTED: &str = "Reported";

/// Action of a history entry appended by a comment.
pub const ACTION_COMMENT: &str = "Comment";

/// Action text for a status change, e.g. `"Reported -> In Progress"`.
pub fn transition_action(old_status: &str, new_status: &str) -> String {
    format!("{old_status} -> {new_status}")
}

// ---------------------------------------------------------------------------
// Validation & normalization
// ---------------------------------------------------------------------------

/// Validate that `status` is one of the recognized status values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if ISSUE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {ISSUE_STATUSES:?}"
        )))
    }
}

/// Canonicalize an urgency value. Matching is case-insensitive;
/// anything unrecognized falls back to [`URGENCY_NORMAL`].
pub fn normalize_urgency(raw: &str) -> &'static str {
    let trimmed = raw.trim();
    URGENCY_LEVELS
        .iter()
        .find(|level| level.eq_ignore_ascii_case(trimmed))
        .copied()
        .unwrap_or(URGENCY_NORMAL)
}

/// Normalize a category: trimmed, blank becomes [`CATEGORY_OTHER`],
/// anything else is kept as given.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CATEGORY_OTHER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Require a non-empty value after trimming. Returns the trimmed value.
pub fn required_field(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
