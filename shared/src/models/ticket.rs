//! Ticket Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Comment;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ticket priority
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Support ticket entity
///
/// Timestamps are UTC epoch milliseconds. `updated_at` never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub author_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Append-only, oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Ticket {
    pub fn is_authored_by(&self, identity_id: &str) -> bool {
        self.author_id == identity_id
    }
}

/// Create ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCreate {
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

/// Assignment change carried by [`TicketUpdate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Assignment {
    Assign { id: String, name: String },
    Unassign,
}

/// Update ticket payload (partial fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub assignment: Option<Assignment>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn assign(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            assignment: Some(Assignment::Assign {
                id: id.into(),
                name: name.into(),
            }),
            ..Default::default()
        }
    }
}
