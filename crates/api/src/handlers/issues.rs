//! Handlers for issue reporting and browsing.
//!
//! `/submit` speaks the reporting form's dialect (multipart in, redirects
//! out); the read endpoints return JSON.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use fixtrack_core::issue::{normalize_category, normalize_urgency, required_field};
use fixtrack_core::types::{DbId, Timestamp};
use fixtrack_core::CoreError;
use fixtrack_db::models::issue::{CreateIssue, Issue, IssueDetail, IssueFilter};
use fixtrack_db::repositories::IssueRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /submit - report an issue
// ---------------------------------------------------------------------------

/// POST /submit
///
/// Accepts the reporting form as multipart: text fields `title`, `location`,
/// `category`, `urgency`, `description`, `contact`, and an optional file
/// field `image`. Redirects to the issue list on success; a validation
/// failure redirects back with the message in the `error` query parameter
/// and persists nothing, not even the attachment.
pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let mut title = String::new();
    let mut location = String::new();
    let mut category = String::new();
    let mut urgency = String::new();
    let mut description = String::new();
    let mut contact = String::new();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = field_text(field).await?,
            "location" => location = field_text(field).await?,
            "category" => category = field_text(field).await?,
            "urgency" => urgency = field_text(field).await?,
            "description" => description = field_text(field).await?,
            "contact" => contact = field_text(field).await?,
            "image" => {
                // Browsers send an empty part when no file was picked.
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !filename.is_empty() {
                    attachment = Some((filename, data.to_vec()));
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    // Validate before touching storage so a rejected submission leaves no
    // stored attachment behind.
    let (title, location, description) = match validate_required(&title, &location, &description)
    {
        Ok(required) => required,
        Err(err) => {
            tracing::debug!(error = %err, "Submission rejected");
            let message = urlencoding::encode(&err.to_string()).into_owned();
            return Ok(Redirect::to(&format!("/issues?error={message}")));
        }
    };

    let media_reference = match &attachment {
        Some((filename, data)) => state.media.store(filename, data).await?,
        None => None,
    };

    let contact = contact.trim();
    let input = CreateIssue {
        title,
        location,
        category: normalize_category(&category),
        urgency: normalize_urgency(&urgency).to_string(),
        description,
        contact: (!contact.is_empty()).then(|| contact.to_string()),
        media_reference,
    };

    let issue = IssueRepo::create(&state.pool, &input).await?;
    tracing::info!(id = issue.id, title = %issue.title, "Issue created");

    Ok(Redirect::to("/issues"))
}

/// Read one multipart text field.
async fn field_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Trim the required form fields, rejecting any that come out empty.
fn validate_required(
    title: &str,
    location: &str,
    description: &str,
) -> Result<(String, String, String), CoreError> {
    Ok((
        required_field("title", title)?,
        required_field("location", location)?,
        required_field("description", description)?,
    ))
}

// ---------------------------------------------------------------------------
// GET /issues - filtered list
// ---------------------------------------------------------------------------

/// GET /issues
///
/// Query parameters `status`, `category`, and `q` are all optional; blank
/// values impose no constraint, matching how the list page builds its
/// filter links.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IssueFilter>,
) -> AppResult<Json<DataResponse<Vec<Issue>>>> {
    let filter = IssueFilter {
        status: non_blank(params.status),
        category: non_blank(params.category),
        q: non_blank(params.q),
    };

    let issues = IssueRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: issues }))
}

/// Treat missing and blank query parameters the same.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// GET /issue/{id} - detail with history
// ---------------------------------------------------------------------------

/// GET /issue/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<IssueDetail>>> {
    let detail = IssueRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// GET /api/issue_status/{id} - status poll
// ---------------------------------------------------------------------------

/// Bare response shape for the status poll endpoint.
#[derive(Debug, Serialize)]
pub struct IssueStatusResponse {
    pub id: DbId,
    pub status: String,
    pub updated_at: Timestamp,
}

/// GET /api/issue_status/{id}
///
/// Lightweight poll used by the detail page to refresh the status badge.
/// Returns the bare shape that script reads, not the `data` envelope.
pub async fn issue_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<IssueStatusResponse>> {
    let issue = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;

    Ok(Json(IssueStatusResponse {
        id: issue.id,
        status: issue.status,
        updated_at: issue.updated_at,
    }))
}
