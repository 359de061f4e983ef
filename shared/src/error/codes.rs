//! Unified error codes for the ticket desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Ticket errors
//! - 8xxx: User directory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// No identity is logged in
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Capability switched off by configuration
    FeatureDisabled = 2010,

    // ==================== 4xxx: Ticket ====================
    /// Ticket not found
    TicketNotFound = 4001,
    /// Comment content is empty
    CommentEmpty = 4002,
    /// Another mutation on the same entity is still pending
    MutationInFlight = 4003,

    // ==================== 8xxx: User directory ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    UserEmailExists = 8002,
    /// Admin tried to delete own account
    UserCannotDeleteSelf = 8003,

    // ==================== 9xxx: System ====================
    /// Seed data could not be read or parsed
    SeedLoadFailed = 9006,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::FeatureDisabled => "Feature is disabled in this environment",

            // Ticket
            ErrorCode::TicketNotFound => "Ticket not found",
            ErrorCode::CommentEmpty => "Comment must not be empty",
            ErrorCode::MutationInFlight => "Another change to this item is still in progress",

            // User directory
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "Email is already registered",
            ErrorCode::UserCannotDeleteSelf => "Cannot delete your own account",

            // System
            ErrorCode::SeedLoadFailed => "Failed to load seed data",
        }
    }

    /// Whether this code reports a missing resource of any kind
    pub const fn is_not_found(&self) -> bool {
        matches!(self, ErrorCode::TicketNotFound | ErrorCode::UserNotFound)
    }

    /// Whether the code reports rejected input
    pub const fn is_validation(&self) -> bool {
        matches!(self, ErrorCode::ValidationFailed | ErrorCode::CommentEmpty)
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2010 => Ok(ErrorCode::FeatureDisabled),

            // Ticket
            4001 => Ok(ErrorCode::TicketNotFound),
            4002 => Ok(ErrorCode::CommentEmpty),
            4003 => Ok(ErrorCode::MutationInFlight),

            // User directory
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UserEmailExists),
            8003 => Ok(ErrorCode::UserCannotDeleteSelf),

            // System
            9006 => Ok(ErrorCode::SeedLoadFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
