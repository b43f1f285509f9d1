//! Upload filename rules: extension allow-listing, sanitization, and the
//! collision-resistant stored-name convention.
//!
//! Stored names are `"<unix-micros>_<sanitized-original>"`. They contain no
//! path separators, so a stored name doubles as the opaque reference handed
//! back to clients.

use crate::types::Timestamp;

/// Extensions accepted by default: common photo and phone-video formats.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "mp4", "mov", "avi"];

/// Fallback stem when sanitization leaves nothing of the original name.
const EMPTY_NAME_FALLBACK: &str = "upload";

// ---------------------------------------------------------------------------
// Extension handling
// ---------------------------------------------------------------------------

/// Lowercased extension of `filename`, or `None` when it has no dot.
pub fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether `filename` carries an extension in `allowed` (case-insensitive).
/// A name without any extension is never allowed.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    match extension(filename) {
        Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts are dropped, and every character outside
/// `[A-Za-z0-9._-]` becomes `_`. An empty result falls back to `"upload"`.
///
/// # Examples
///
/// ```
/// use fixtrack_core::upload::sanitize_filename;
///
/// assert_eq!(sanitize_filename("broken tap.jpg"), "broken_tap.jpg");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("C:\\photos\\leak.png"), "leak.png");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let last_segment = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let sanitized: String = last_segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        sanitized
    }
}

/// Derive the stored name for an upload received at `now`.
pub fn stored_name(filename: &str, now: Timestamp) -> String {
    format!("{}_{}", now.timestamp_micros(), sanitize_filename(filename))
}

// ---------------------------------------------------------------------------
// Reference safety
// ---------------------------------------------------------------------------

/// Whether a client-supplied reference is safe to join onto the storage
/// root. References are single path components; separators and the dot
/// directories would escape the root.
pub fn is_safe_reference(reference: &str) -> bool {
    !reference.is_empty()
        && reference != "."
        && reference != ".."
        && !reference.contains('/')
        && !reference.contains('\\')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn allowed() -> Vec<String> {
        DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    // -- extension --

    #[test]
    fn extension_lowercased() {
        assert_eq!(extension("photo.JPG").as_deref(), Some("jpg"));
    }

    #[test]
    fn extension_takes_last_dot() {
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
    }

    #[test]
    fn no_extension() {
        assert_eq!(extension("README"), None);
        assert_eq!(extension("trailing."), None);
    }

    // -- has_allowed_extension --

    #[test]
    fn allowed_extensions_accepted() {
        assert!(has_allowed_extension("leak.png", &allowed()));
        assert!(has_allowed_extension("clip.MOV", &allowed()));
    }

    #[test]
    fn disallowed_extension_rejected() {
        assert!(!has_allowed_extension("script.exe", &allowed()));
        assert!(!has_allowed_extension("notes.txt", &allowed()));
    }

    #[test]
    fn missing_extension_rejected() {
        assert!(!has_allowed_extension("noext", &allowed()));
    }

    // -- sanitize_filename --

    #[test]
    fn sanitize_replaces_specials() {
        assert_eq!(sanitize_filename("room 12 (wing B).png"), "room_12__wing_B_.png");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\x\\leak.png"), "leak.png");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("///"), "upload");
        assert_eq!(sanitize_filename("...."), "upload");
    }

    // -- stored_name --

    #[test]
    fn stored_name_prefixed_with_micros() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let name = stored_name("leak report.jpg", now);
        assert_eq!(
            name,
            format!("{}_leak_report.jpg", now.timestamp_micros())
        );
    }

    // -- is_safe_reference --

    #[test]
    fn safe_reference_accepted() {
        assert!(is_safe_reference("1773412345678901_leak.png"));
    }

    #[test]
    fn traversal_reference_rejected() {
        assert!(!is_safe_reference("../secrets.txt"));
        assert!(!is_safe_reference("..\\secrets.txt"));
        assert!(!is_safe_reference(".."));
        assert!(!is_safe_reference("."));
        assert!(!is_safe_reference("a/b.png"));
        assert!(!is_safe_reference(""));
    }

    #[test]
    fn embedded_dots_are_safe() {
        // A single component with interior dots cannot escape the root.
        assert!(is_safe_reference("report..v2.png"));
    }
}
