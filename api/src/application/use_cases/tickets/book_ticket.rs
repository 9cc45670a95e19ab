use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::ticket_repository::TicketRepository;
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::tickets::ticket::{NewTicket, Ticket};
use crate::domain::users::user::Role;

pub struct BookTicket<'a, U, T, K>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub users: &'a U,
    pub trains: &'a T,
    pub tickets: &'a K,
}

#[derive(Debug, Clone)]
pub struct BookTicketRequest {
    /// Passenger; defaults to the caller. Booking for someone else needs employee.
    pub user: Option<Uuid>,
    pub train: Uuid,
}

impl<'a, U, T, K> BookTicket<'a, U, T, K>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    K: TicketRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, req: &BookTicketRequest) -> ServiceResult<Ticket> {
        let acting = access::require_user(self.users, actor).await?;
        let passenger = req.user.unwrap_or(acting.id);
        if passenger != acting.id && !acting.role.satisfies(Role::Employee) {
            return Err(ServiceError::permission(
                "You need to be an employee to book for another user !",
            ));
        }

        let missing = || ServiceError::validation("Can't find train or user !");
        self.users
            .find_by_id(passenger, RecordScope::Active)
            .await?
            .ok_or_else(missing)?;
        self.trains
            .find_by_id(req.train, RecordScope::Active)
            .await?
            .ok_or_else(missing)?;

        let ticket = self
            .tickets
            .create(&NewTicket {
                user_id: passenger,
                train_id: req.train,
            })
            .await?;
        tracing::info!(ticket_id = %ticket.id, user_id = %passenger, train_id = %req.train, "ticket_booked");
        Ok(ticket)
    }
}
