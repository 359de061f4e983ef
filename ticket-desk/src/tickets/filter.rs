//! Dashboard projection: search/status/priority filters and counters

use serde::{Deserialize, Serialize};
use shared::models::{Ticket, TicketPriority, TicketStatus};

/// Ticket list filter
///
/// All set criteria must match (AND). An empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketFilter {
    /// Case-insensitive substring of subject or description, matched as typed
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
}

impl TicketFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                ticket.subject.to_lowercase().contains(&term)
                    || ticket.description.to_lowercase().contains(&term)
            }
        };
        search_ok
            && self.status.is_none_or(|s| ticket.status == s)
            && self.priority.is_none_or(|p| ticket.priority == p)
    }

    pub fn apply(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        tickets.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Per-status counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, t| {
            stats.total += 1;
            match t.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
            stats
        })
    }
}

/// Which tickets a dashboard covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardScope {
    /// Only tickets the viewer wrote
    Mine,
    All,
}

/// Role-scoped dashboard
///
/// `stats` counts the whole scope; `tickets` is the scope after the filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub scope: DashboardScope,
    pub stats: TicketStats,
    pub tickets: Vec<Ticket>,
}

impl Dashboard {
    pub fn build(scope: DashboardScope, scoped: Vec<Ticket>, filter: &TicketFilter) -> Self {
        let stats = TicketStats::from_tickets(&scoped);
        let tickets = scoped.into_iter().filter(|t| filter.matches(t)).collect();
        Self {
            scope,
            stats,
            tickets,
        }
    }
}
