//! Shared types for the ticket desk
//!
//! Domain models (identities, tickets, comments, directory accounts),
//! the unified error system and small utilities used across crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
