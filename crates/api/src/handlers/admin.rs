//! Handlers for the admin dashboard actions.

use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use fixtrack_core::issue::validate_status;
use fixtrack_core::types::{DbId, Timestamp};
use fixtrack_core::CoreError;
use fixtrack_db::repositories::IssueRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /admin/update_status - change an issue's status
// ---------------------------------------------------------------------------

/// JSON body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub id: DbId,
    pub status: String,
    #[serde(default = "default_admin_actor")]
    pub actor: String,
    #[serde(default)]
    pub note: String,
}

fn default_admin_actor() -> String {
    "Admin".to_string()
}

/// Bare response shape the dashboard script reads (`data.new_status`).
#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub ok: bool,
    pub new_status: String,
    pub updated_at: Timestamp,
}

/// POST /admin/update_status
///
/// Validates the status value, applies the change, and reports the new
/// status with the refreshed timestamp. Unknown ids are a 404.
pub async fn update_status(
    State(state): State<AppState>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<UpdateStatusResponse>> {
    validate_status(&body.status)?;

    let issue =
        IssueRepo::update_status(&state.pool, body.id, &body.status, &body.actor, &body.note)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Issue",
                id: body.id,
            }))?;

    tracing::info!(id = issue.id, status = %issue.status, "Issue status changed");

    Ok(Json(UpdateStatusResponse {
        ok: true,
        new_status: issue.status,
        updated_at: issue.updated_at,
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/comment - append a comment
// ---------------------------------------------------------------------------

/// Urlencoded body for the comment form.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub id: DbId,
    #[serde(default = "default_staff_actor")]
    pub actor: String,
    #[serde(default)]
    pub comment: String,
}

fn default_staff_actor() -> String {
    "Staff".to_string()
}

/// POST /admin/comment
///
/// Appends a `Comment` history entry and sends the browser back to the
/// issue's detail page. Unknown ids are a 404.
pub async fn comment(
    State(state): State<AppState>,
    Form(body): Form<CommentRequest>,
) -> AppResult<Redirect> {
    let issue = IssueRepo::add_comment(&state.pool, body.id, &body.actor, &body.comment)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Issue",
            id: body.id,
        }))?;

    tracing::info!(id = issue.id, actor = %body.actor, "Comment added");

    Ok(Redirect::to(&format!("/issue/{}", issue.id)))
}
