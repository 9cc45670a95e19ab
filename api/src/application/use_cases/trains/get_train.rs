use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::train_repository::TrainRepository;
use crate::domain::trains::train::Train;

pub struct GetTrain<'a, T: TrainRepository + ?Sized> {
    pub trains: &'a T,
}

impl<'a, T: TrainRepository + ?Sized> GetTrain<'a, T> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Train> {
        self.trains
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Train {id} not found !")))
    }
}
