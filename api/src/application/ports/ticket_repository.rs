use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::listing::ListQuery;
use crate::domain::tickets::ticket::{NewTicket, Ticket, TicketSort};

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(&self, ticket: &NewTicket) -> anyhow::Result<Ticket>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Ticket>>;
    async fn list(&self, query: &ListQuery<TicketSort>) -> anyhow::Result<Vec<Ticket>>;
    /// Stamps `validated_at` unless already set; `None` when the ticket is unknown.
    async fn validate(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<Option<Ticket>>;
}
