use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::domain::trainstations::trainstation::Trainstation;

pub struct GetTrainstation<'a, S: TrainstationRepository + ?Sized> {
    pub stations: &'a S,
}

impl<'a, S: TrainstationRepository + ?Sized> GetTrainstation<'a, S> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Trainstation> {
        self.stations
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Trainstation {id} not found !")))
    }
}
