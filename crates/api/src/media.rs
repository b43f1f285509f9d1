//! Local filesystem storage for issue attachments.
//!
//! Attachments live flat under one storage root and are addressed by their
//! stored file name only. Disallowed extensions are dropped silently (the
//! submission itself still succeeds), matching the behaviour the reporting
//! form relies on.

use std::path::PathBuf;

use fixtrack_core::upload::{has_allowed_extension, is_safe_reference, stored_name};

use crate::error::{AppError, AppResult};

/// Attachment store rooted at a single directory.
#[derive(Debug)]
pub struct MediaStore {
    root: PathBuf,
    allowed_exts: Vec<String>,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, allowed_exts: Vec<String>) -> Self {
        Self {
            root: root.into(),
            allowed_exts,
        }
    }

    /// Create the storage root if it does not exist yet.
    pub async fn ensure_root(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        Ok(())
    }

    /// Store one attachment and return its reference (the stored file name,
    /// never a path).
    ///
    /// Returns `Ok(None)` when the extension is missing or not allowed; the
    /// caller records the issue without an attachment in that case.
    pub async fn store(&self, filename: &str, bytes: &[u8]) -> AppResult<Option<String>> {
        if !has_allowed_extension(filename, &self.allowed_exts) {
            tracing::warn!(filename = %filename, "Attachment extension not allowed, dropping it");
            return Ok(None);
        }

        let reference = stored_name(filename, chrono::Utc::now());

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        tokio::fs::write(self.root.join(&reference), bytes)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(Some(reference))
    }

    /// Resolve a stored reference to its on-disk path.
    ///
    /// Rejects anything that could escape the storage root before touching
    /// the filesystem.
    pub async fn resolve(&self, reference: &str) -> AppResult<PathBuf> {
        if !is_safe_reference(reference) {
            return Err(AppError::BadRequest(format!(
                "Invalid media reference '{reference}'"
            )));
        }

        let path = self.root.join(reference);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(AppError::NotFound(format!(
                "No stored media named '{reference}'"
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("No stored media named '{reference}'"),
            )),
            Err(e) => Err(AppError::InternalError(e.to_string())),
        }
    }
}

/// Map a stored reference's extension to a content type for serving.
pub fn content_type_for(reference: &str) -> &'static str {
    let ext = reference.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
