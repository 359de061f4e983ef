//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Stores call these defensively; callers are expected to validate first.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Ticket subject, user display name
pub const MAX_SUBJECT_LEN: usize = 200;

/// Ticket description
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Comment body
pub const MAX_COMMENT_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
///
/// Returns the trimmed value on success.
pub fn validate_required_text<'a>(
    value: &'a str,
    field: &str,
    max_len: usize,
) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            trimmed.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(trimmed)
}

/// Validate that an optional string, if present, is a valid required text.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len).map(|t| Some(t.to_string())),
        None => Ok(None),
    }
}

/// Validate a comment body
///
/// Blank content is `CommentEmpty`; over-long content is `ValidationFailed`.
pub fn validate_comment(value: &str) -> Result<&str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::new(ErrorCode::CommentEmpty));
    }
    validate_required_text(value, "comment", MAX_COMMENT_LEN)
}

/// Minimal email shape check: one `@` with text on both sides.
pub fn validate_email(value: &str) -> Result<&str, AppError> {
    let email = validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(AppError::validation("email is not a valid address").with_detail("field", "email")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(validate_required_text("  hello ", "subject", 10).unwrap(), "hello");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let err = validate_required_text(" \n\t ", "subject", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "subject must not be empty");
    }

    #[test]
    fn test_required_text_rejects_too_long() {
        let err = validate_required_text("abcdef", "subject", 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(validate_optional_text(&None, "subject", 5).unwrap(), None);
        assert_eq!(
            validate_optional_text(&Some(" ab ".to_string()), "subject", 5).unwrap(),
            Some("ab".to_string())
        );
        assert!(validate_optional_text(&Some("  ".to_string()), "subject", 5).is_err());
    }

    #[test]
    fn test_comment() {
        assert_eq!(validate_comment(" ok ").unwrap(), "ok");
        let err = validate_comment("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::CommentEmpty);
        assert!(err.is_validation());
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert_eq!(validate_comment(&long).unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_email(" jane@example.com ").unwrap(), "jane@example.com");
        assert!(validate_email("jane").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c").is_err());
    }
}
