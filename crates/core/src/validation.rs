//! Field validation helpers for admin content endpoints.
//!
//! The admin CRUD surface (team members, testimonials, investment options)
//! reports validation failures as a field-to-message map rather than a
//! single error string, so each helper returns an `Option` and the caller
//! collects [`FieldError`]s.

use std::collections::HashMap;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collapses a list of field errors into a `field -> message` map.
///
/// Later errors for the same field win; in practice each field is checked
/// once.
#[must_use]
pub fn into_error_map(errors: Vec<FieldError>) -> HashMap<&'static str, String> {
    errors.into_iter().map(|e| (e.field, e.message)).collect()
}

/// Trims a string and enforces a maximum length.
///
/// Returns `None` when empty after trimming or longer than `max_len`.
#[must_use]
pub fn sanitize_string(value: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_len {
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates an image reference: a site-relative `/images/...` path or an
/// `https://` URL.
#[must_use]
pub fn validate_image_path(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.starts_with("/images/") || trimmed.starts_with("https://") {
        sanitize_string(trimmed, 500)
    } else {
        None
    }
}

/// Validates an external link as an `https://` URL.
#[must_use]
pub fn validate_https_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.starts_with("https://") && trimmed.len() > "https://".len() {
        sanitize_string(trimmed, 500)
    } else {
        None
    }
}

/// Validates an integer within an inclusive range.
#[must_use]
pub const fn validate_int_range(value: i32, min: i32, max: i32) -> Option<i32> {
    if value >= min && value <= max {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello  ", 10), Some("hello".to_string()));
        assert_eq!(sanitize_string("   ", 10), None);
        assert_eq!(sanitize_string("toolongvalue", 5), None);
    }

    #[test]
    fn test_validate_image_path() {
        assert!(validate_image_path("/images/team/member-1.jpg").is_some());
        assert!(validate_image_path("https://cdn.example.com/p.jpg").is_some());
        assert!(validate_image_path("http://cdn.example.com/p.jpg").is_none());
        assert!(validate_image_path("../etc/passwd").is_none());
    }

    #[test]
    fn test_validate_https_url() {
        assert!(validate_https_url("https://instagram.com/team").is_some());
        assert!(validate_https_url("https://").is_none());
        assert!(validate_https_url("javascript:alert(1)").is_none());
    }

    #[test]
    fn test_validate_int_range() {
        assert_eq!(validate_int_range(0, 0, 100), Some(0));
        assert_eq!(validate_int_range(100, 0, 100), Some(100));
        assert_eq!(validate_int_range(101, 0, 100), None);
        assert_eq!(validate_int_range(-1, 0, 100), None);
    }

    #[test]
    fn test_error_map() {
        let map = into_error_map(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("image", "Valid image path required"),
        ]);
        assert_eq!(map["name"], "Name is required");
        assert_eq!(map.len(), 2);
    }
}
