//! Pure domain logic for the campus maintenance tracker.
//!
//! No I/O lives here: vocabulary and validation for issues, the history
//! line format, upload filename rules, and the repair-time estimation
//! heuristics. Everything is testable without a database or a network.

pub mod error;
pub mod estimate;
pub mod issue;
pub mod types;
pub mod upload;

pub use error::CoreError;
