//! TicketStore - exclusive owner of the ticket collection
//!
//! Invariants kept here regardless of caller:
//! - the collection is ordered newest first (create prepends)
//! - ids are never reused
//! - comments are append-only and never blank
//! - `updated_at` never decreases and is bumped by every mutation
//!
//! Reads hand out clones; nothing outside the store holds a mutable
//! reference to a ticket.

use std::collections::HashSet;

use shared::models::{Assignment, Comment, Role, Ticket, TicketPriority, TicketStatus, TicketUpdate};
use shared::util::snowflake_id;

use crate::core::clock::{Clock, SystemClock};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_SUBJECT_LEN, validate_comment, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub struct TicketStore {
    /// Newest first
    tickets: Vec<Ticket>,
    /// Every ticket and comment id handed out so far
    issued_ids: HashSet<String>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for TicketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketStore")
            .field("tickets", &self.tickets.len())
            .field("clock", &"<Clock>")
            .finish()
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore {
    /// Empty store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            tickets: Vec::new(),
            issued_ids: HashSet::new(),
            clock,
        }
    }

    /// Build a store from seed tickets, keeping their order
    ///
    /// Seeds must already hold the store invariants: newest first by
    /// `created_at`, `updated_at >= created_at`, no blank comments. Ticket
    /// ids and comment ids are separate namespaces; a duplicate within
    /// either is rejected. Every violation reports `SeedLoadFailed`.
    pub fn from_seed(tickets: Vec<Ticket>, clock: Box<dyn Clock>) -> AppResult<Self> {
        let mut ticket_ids = HashSet::new();
        let mut comment_ids = HashSet::new();
        let mut previous_created: Option<i64> = None;
        for ticket in &tickets {
            if !ticket_ids.insert(ticket.id.clone()) {
                return Err(duplicate_seed_id("ticket", &ticket.id));
            }
            if ticket.updated_at < ticket.created_at {
                return Err(invalid_seed(&ticket.id, "updated_at precedes created_at"));
            }
            if previous_created.is_some_and(|prev| ticket.created_at > prev) {
                return Err(invalid_seed(&ticket.id, "tickets are not ordered newest first"));
            }
            previous_created = Some(ticket.created_at);

            for comment in &ticket.comments {
                if !comment_ids.insert(comment.id.clone()) {
                    return Err(duplicate_seed_id("comment", &comment.id));
                }
                validate_comment(&comment.content).map_err(|_| {
                    invalid_seed(&ticket.id, "comment is blank")
                        .with_detail("comment_id", comment.id.as_str())
                })?;
            }
        }

        let mut store = Self::with_clock(clock);
        store.issued_ids = ticket_ids;
        store.issued_ids.extend(comment_ids);
        store.tickets = tickets;
        Ok(store)
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = snowflake_id().to_string();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn position(&self, id: &str) -> AppResult<usize> {
        self.tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::ticket_not_found(id))
    }

    /// Bump `updated_at`, never moving it backwards
    fn touch(ticket: &mut Ticket, now: i64) {
        ticket.updated_at = ticket.updated_at.max(now);
    }

    /// Create a ticket and prepend it to the collection
    pub fn create_ticket(
        &mut self,
        subject: &str,
        description: &str,
        priority: TicketPriority,
        author_id: &str,
        author_name: &str,
    ) -> AppResult<Ticket> {
        let subject = validate_required_text(subject, "subject", MAX_SUBJECT_LEN)?.to_string();
        let description =
            validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?.to_string();

        let now = self.clock.now_millis();
        let ticket = Ticket {
            id: self.next_id(),
            subject,
            description,
            priority,
            status: TicketStatus::Open,
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        tracing::debug!(ticket_id = %ticket.id, author_id = %author_id, "Ticket created");
        self.tickets.insert(0, ticket.clone());
        Ok(ticket)
    }

    /// Merge partial fields into a ticket
    ///
    /// Only the target ticket's `updated_at` changes. Unknown ids report
    /// `TicketNotFound` and leave the collection untouched.
    pub fn update_ticket(&mut self, id: &str, update: TicketUpdate) -> AppResult<Ticket> {
        let idx = self.position(id)?;
        let subject = validate_optional_text(&update.subject, "subject", MAX_SUBJECT_LEN)?;
        let description =
            validate_optional_text(&update.description, "description", MAX_DESCRIPTION_LEN)?;

        let now = self.clock.now_millis();
        let ticket = &mut self.tickets[idx];
        if let Some(subject) = subject {
            ticket.subject = subject;
        }
        if let Some(description) = description {
            ticket.description = description;
        }
        if let Some(priority) = update.priority {
            ticket.priority = priority;
        }
        if let Some(status) = update.status {
            if status != ticket.status {
                tracing::info!(ticket_id = %id, from = %ticket.status, to = %status, "Ticket status changed");
            }
            ticket.status = status;
        }
        match update.assignment {
            Some(Assignment::Assign { id: assignee, name }) => {
                ticket.assigned_to = Some(assignee);
                ticket.assigned_to_name = Some(name);
            }
            Some(Assignment::Unassign) => {
                ticket.assigned_to = None;
                ticket.assigned_to_name = None;
            }
            None => {}
        }
        Self::touch(ticket, now);
        Ok(ticket.clone())
    }

    /// Append a comment
    ///
    /// Blank content is rejected with `CommentEmpty` before the ticket is
    /// looked up, and leaves both comments and `updated_at` unchanged.
    pub fn add_comment(
        &mut self,
        ticket_id: &str,
        content: &str,
        author: &str,
        author_role: Role,
    ) -> AppResult<Comment> {
        let content = validate_comment(content)
            .map_err(|e| e.with_detail("ticket_id", ticket_id))?
            .to_string();
        let idx = self.position(ticket_id)?;

        let now = self.clock.now_millis();
        let comment = Comment {
            id: self.next_id(),
            content,
            author: author.to_string(),
            author_role,
            timestamp: now,
        };
        let ticket = &mut self.tickets[idx];
        ticket.comments.push(comment.clone());
        Self::touch(ticket, now);
        Ok(comment)
    }

    pub fn get(&self, id: &str) -> AppResult<Ticket> {
        self.position(id).map(|idx| self.tickets[idx].clone())
    }

    /// Tickets written by `author_id`, newest first
    pub fn tickets_for_author(&self, author_id: &str) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.is_authored_by(author_id))
            .cloned()
            .collect()
    }

    /// Every ticket, newest first
    pub fn all_tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

fn duplicate_seed_id(kind: &str, id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::SeedLoadFailed,
        format!("Duplicate {} id in seed tickets: {}", kind, id),
    )
}

fn invalid_seed(ticket_id: &str, reason: &str) -> AppError {
    AppError::with_message(
        ErrorCode::SeedLoadFailed,
        format!("Invalid seed ticket {}: {}", ticket_id, reason),
    )
    .with_detail("ticket_id", ticket_id)
}
