//! Issue and history models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fixtrack_core::types::{DbId, Timestamp};

/// A row from the `issues` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Issue {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub category: String,
    pub urgency: String,
    pub description: String,
    pub contact: Option<String>,
    pub media_reference: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `issue_history` table. Entries are append-only; the
/// `id` is the event order within an issue.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    pub id: DbId,
    pub issue_id: DbId,
    pub created_at: Timestamp,
    pub actor: String,
    pub action: String,
    pub note: String,
}

/// An issue together with its full history, oldest entry first.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetail {
    pub issue: Issue,
    pub history: Vec<HistoryEntry>,
}

/// DTO for creating a new issue. Fields are expected to be validated and
/// normalized (trimmed title/location/description, canonical urgency,
/// non-blank category) before reaching the repository.
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub title: String,
    pub location: String,
    pub category: String,
    pub urgency: String,
    pub description: String,
    pub contact: Option<String>,
    pub media_reference: Option<String>,
}

/// Filters for the issue list. `None` means no constraint; `q` is a
/// case-insensitive substring match over title, description, and location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}
