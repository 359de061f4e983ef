//! TicketService - authorized, latency-simulating façade over [`TicketStore`]
//!
//! # 变更流程
//!
//! ```text
//! validate → lookup (NotFound) → authorize → claim in-flight key
//!          → simulated latency → commit to store
//! ```
//!
//! 锁不会跨越 `.await`：读锁只在查找时短暂持有，写锁只在提交时持有。

use std::time::Duration;

use parking_lot::RwLock;
use shared::models::{Comment, Identity, Ticket, TicketCreate, TicketUpdate};

use super::filter::{Dashboard, DashboardScope, TicketFilter};
use super::inflight::{InFlight, create_key, ticket_key};
use super::store::TicketStore;
use crate::auth::{Action, authorize, authorize_ticket, role_can};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_SUBJECT_LEN, validate_comment, validate_required_text,
};

#[derive(Debug)]
pub struct TicketService {
    store: RwLock<TicketStore>,
    inflight: InFlight,
    latency: Duration,
}

impl TicketService {
    pub fn new(store: TicketStore, mutation_latency_ms: u64) -> Self {
        Self {
            store: RwLock::new(store),
            inflight: InFlight::new(),
            latency: Duration::from_millis(mutation_latency_ms),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Create a ticket authored by `actor`
    pub async fn create_ticket(&self, actor: &Identity, payload: TicketCreate) -> AppResult<Ticket> {
        authorize(actor, Action::CreateTicket)?;
        validate_required_text(&payload.subject, "subject", MAX_SUBJECT_LEN)?;
        validate_required_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

        let _guard = self.inflight.claim(create_key(&actor.id))?;
        self.simulate_latency().await;

        let ticket = self.store.write().create_ticket(
            &payload.subject,
            &payload.description,
            payload.priority,
            &actor.id,
            &actor.name,
        )?;
        tracing::info!(
            ticket_id = %ticket.id,
            author_id = %actor.id,
            priority = %ticket.priority,
            "Ticket submitted"
        );
        Ok(ticket)
    }

    /// Apply a partial update
    ///
    /// Requires edit access to the ticket. A status change also requires
    /// `ChangeStatus` and an assignment change requires `AssignTicket`.
    pub async fn update_ticket(
        &self,
        actor: &Identity,
        id: &str,
        update: TicketUpdate,
    ) -> AppResult<Ticket> {
        let current = self.store.read().get(id)?;
        authorize_ticket(actor, &current)?;
        if update.status.is_some() {
            authorize(actor, Action::ChangeStatus)?;
        }
        if update.assignment.is_some() {
            authorize(actor, Action::AssignTicket)?;
        }

        let _guard = self.inflight.claim(ticket_key(id))?;
        self.simulate_latency().await;

        let ticket = self.store.write().update_ticket(id, update)?;
        tracing::info!(ticket_id = %id, user_id = %actor.id, "Ticket updated");
        Ok(ticket)
    }

    /// Comment as `actor`
    pub async fn add_comment(&self, actor: &Identity, id: &str, content: &str) -> AppResult<Comment> {
        validate_comment(content)?;
        let current = self.store.read().get(id)?;
        authorize_ticket(actor, &current)?;

        let _guard = self.inflight.claim(ticket_key(id))?;
        self.simulate_latency().await;

        let comment = self
            .store
            .write()
            .add_comment(id, content, &actor.name, actor.role)?;
        tracing::info!(ticket_id = %id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    pub fn get_ticket(&self, actor: &Identity, id: &str) -> AppResult<Ticket> {
        let ticket = self.store.read().get(id)?;
        authorize_ticket(actor, &ticket)?;
        Ok(ticket)
    }

    /// Role-scoped ticket list, newest first
    pub fn visible_tickets(&self, actor: &Identity) -> Vec<Ticket> {
        self.scoped(actor).1
    }

    pub fn dashboard(&self, actor: &Identity, filter: &TicketFilter) -> Dashboard {
        let (scope, tickets) = self.scoped(actor);
        Dashboard::build(scope, tickets, filter)
    }

    fn scoped(&self, actor: &Identity) -> (DashboardScope, Vec<Ticket>) {
        let store = self.store.read();
        if role_can(actor.role, Action::ViewAllTickets) {
            (DashboardScope::All, store.all_tickets())
        } else {
            (DashboardScope::Mine, store.tickets_for_author(&actor.id))
        }
    }

    /// Whether a mutation on `ticket_id` is pending
    pub fn is_pending(&self, ticket_id: &str) -> bool {
        self.inflight.is_claimed(&ticket_key(ticket_id))
    }

    pub fn ticket_count(&self) -> usize {
        self.store.read().len()
    }
}
