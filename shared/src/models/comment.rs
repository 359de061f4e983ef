//! Comment Model

use serde::{Deserialize, Serialize};

use super::Role;

/// Ticket comment, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    /// Author display name
    pub author: String,
    pub author_role: Role,
    pub timestamp: i64,
}
