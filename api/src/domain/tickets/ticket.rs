use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

/// A booking of one train by one user. Only `validated_at` ever changes.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub train_id: Uuid,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Stamps the ticket; a second validation keeps the first timestamp.
    pub fn validate(&mut self, at: DateTime<Utc>) {
        if self.validated_at.is_none() {
            self.validated_at = Some(at);
            self.updated_at = at;
        }
    }
}

// Tickets have no deletion; they always sit in the active scope.
impl SoftDeletable for Ticket {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub user_id: Uuid,
    pub train_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSort {
    CreatedAt,
    ValidatedAt,
}

impl SortField for TicketSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(TicketSort::CreatedAt),
            "validated_at" => Some(TicketSort::ValidatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            TicketSort::CreatedAt => "created_at",
            TicketSort::ValidatedAt => "validated_at",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn second_validation_keeps_first_stamp() {
        let created = Utc::now();
        let mut ticket = Ticket {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            train_id: Uuid::new_v4(),
            validated_at: None,
            created_at: created,
            updated_at: created,
        };
        let first = created + Duration::minutes(5);
        ticket.validate(first);
        ticket.validate(first + Duration::minutes(5));
        assert_eq!(ticket.validated_at, Some(first));
    }
}
