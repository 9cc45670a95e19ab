use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::ticket_repository::TicketRepository;
use crate::domain::listing::ListQuery;
use crate::domain::tickets::ticket::{NewTicket, Ticket, TicketSort};
use crate::infrastructure::db::{PgPool, order_by};

const COLUMNS: &str = "id, user_id, train_id, validated_at, created_at, updated_at";

pub struct SqlxTicketRepository {
    pub pool: PgPool,
}

impl SqlxTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_ticket(r: PgRow) -> Ticket {
    Ticket {
        id: r.get("id"),
        user_id: r.get("user_id"),
        train_id: r.get("train_id"),
        validated_at: r.get("validated_at"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl TicketRepository for SqlxTicketRepository {
    async fn create(&self, ticket: &NewTicket) -> anyhow::Result<Ticket> {
        let row = sqlx::query(&format!(
            "INSERT INTO tickets (user_id, train_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(ticket.user_id)
        .bind(ticket.train_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_ticket(row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Ticket>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM tickets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_ticket))
    }

    async fn list(&self, query: &ListQuery<TicketSort>) -> anyhow::Result<Vec<Ticket>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM tickets ORDER BY {} LIMIT $1",
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_ticket).collect())
    }

    async fn validate(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<Option<Ticket>> {
        // The first stamp wins; later validations leave the row untouched.
        let row = sqlx::query(&format!(
            r#"UPDATE tickets SET
                 validated_at = COALESCE(validated_at, $2),
                 updated_at = CASE WHEN validated_at IS NULL THEN $2 ELSE updated_at END
               WHERE id = $1
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_ticket))
    }
}
