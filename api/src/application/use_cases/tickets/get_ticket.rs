use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::ticket_repository::TicketRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::tickets::ticket::Ticket;
use crate::domain::users::user::Role;

pub struct GetTicket<'a, U, K>
where
    U: UserRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub users: &'a U,
    pub tickets: &'a K,
}

impl<'a, U, K> GetTicket<'a, U, K>
where
    U: UserRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<Ticket> {
        access::require_role(self.users, actor, Role::Employee).await?;
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Ticket {id} not found !")))
    }
}
