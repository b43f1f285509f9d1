//! Shared response envelope types for API handlers.
//!
//! Collection and detail endpoints use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization. The
//! legacy-shaped endpoints (`/admin/update_status`, `/api/issue_status`,
//! `/predict`, `/health`) return their payloads bare, as the original
//! front-end expects.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: issues }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
