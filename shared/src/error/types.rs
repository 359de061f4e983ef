//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the ticket desk, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether the error reports a missing resource
    pub fn is_not_found(&self) -> bool {
        self.code.is_not_found()
    }

    /// Whether the error reports rejected input
    pub fn is_validation(&self) -> bool {
        self.code.is_validation()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a ticket not found error
    pub fn ticket_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::TicketNotFound, format!("Ticket {} not found", id))
            .with_detail("ticket_id", id)
    }

    /// Create a user not found error
    pub fn user_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::UserNotFound, format!("User {} not found", id))
            .with_detail("user_id", id)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a feature disabled error
    pub fn feature_disabled(feature: impl Into<String>) -> Self {
        let f = feature.into();
        Self::with_message(ErrorCode::FeatureDisabled, format!("{} is disabled", f))
            .with_detail("feature", f)
    }

    /// Create a mutation-in-flight error for the given entity key
    pub fn mutation_in_flight(key: impl Into<String>) -> Self {
        Self::new(ErrorCode::MutationInFlight).with_detail("key", key.into())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::TicketNotFound);
        assert_eq!(err.code, ErrorCode::TicketNotFound);
        assert_eq!(err.message, "Ticket not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "subject")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "subject");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::ticket_not_found("42");
        assert_eq!(err.code, ErrorCode::TicketNotFound);
        assert_eq!(err.message, "Ticket 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.details.as_ref().unwrap().get("ticket_id").unwrap(), "42");

        let err = AppError::invalid_credentials();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err = AppError::permission_denied("Admin only");
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.message, "Admin only");
        assert!(!err.is_not_found());

        let err = AppError::feature_disabled("role switching");
        assert_eq!(err.code, ErrorCode::FeatureDisabled);
        assert_eq!(err.message, "role switching is disabled");

        let err = AppError::mutation_in_flight("ticket:1");
        assert_eq!(err.code, ErrorCode::MutationInFlight);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::UserNotFound, "User 7 not found");
        assert_eq!(format!("{}", err), "User 7 not found");
    }
}
