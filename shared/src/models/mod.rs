//! Data models
//!
//! Shared between the ticket desk core and presentation layers.
//! IDs are `String`, timestamps are UTC epoch milliseconds (`i64`).

pub mod comment;
pub mod identity;
pub mod role;
pub mod ticket;
pub mod user;

// Re-exports
pub use comment::*;
pub use identity::*;
pub use role::*;
pub use ticket::*;
pub use user::*;
