use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::trains::train::Train;
use crate::domain::users::user::Role;

pub struct SetTrainActive<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    pub users: &'a U,
    pub trains: &'a T,
}

impl<'a, U, T> SetTrainActive<'a, U, T>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, id: Uuid, active: bool) -> ServiceResult<Train> {
        access::require_role(self.users, actor, Role::Admin).await?;
        self.trains
            .set_active(id, active, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Train {id} not found !")))
    }
}
