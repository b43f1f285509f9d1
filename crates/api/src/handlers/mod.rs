//! Request handlers.
//!
//! Each submodule provides async handler functions for one part of the
//! surface. Handlers validate input, delegate to [`fixtrack_db`]
//! repositories or the estimation service, and map errors via
//! [`crate::error::AppError`].

pub mod admin;
pub mod issues;
pub mod predict;
pub mod uploads;
