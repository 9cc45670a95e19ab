use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::Role;

pub struct DeleteTrain<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    pub users: &'a U,
    pub trains: &'a T,
}

impl<'a, U, T> DeleteTrain<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<()> {
        access::require_role(self.users, actor, Role::Admin).await?;
        if self.trains.soft_delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(format!("Train {id} not found !")))
        }
    }
}
