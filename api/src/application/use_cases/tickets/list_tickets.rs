use crate::application::access::{self, Principal};
use crate::application::error::ServiceResult;
use crate::application::ports::ticket_repository::TicketRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::listing::ListQuery;
use crate::domain::tickets::ticket::{Ticket, TicketSort};
use crate::domain::users::user::Role;

pub struct ListTickets<'a, U, K>
where
    U: UserRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub users: &'a U,
    pub tickets: &'a K,
}

impl<'a, U, K> ListTickets<'a, U, K>
where
    U: UserRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        query: &ListQuery<TicketSort>,
    ) -> ServiceResult<Vec<Ticket>> {
        access::require_role(self.users, actor, Role::Employee).await?;
        Ok(self.tickets.list(query).await?)
    }
}
