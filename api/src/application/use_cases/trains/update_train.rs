use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, optional};
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::trains::train::{Train, TrainPatch};
use crate::domain::users::user::Role;

use super::ensure_stations;

pub struct UpdateTrain<'a, U, T, S>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub users: &'a U,
    pub trains: &'a T,
    pub stations: &'a S,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTrainRequest {
    pub name: Option<String>,
    pub start_station: Option<Uuid>,
    pub end_station: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl<'a, U, T, S> UpdateTrain<'a, U, T, S>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        id: Uuid,
        req: &UpdateTrainRequest,
    ) -> ServiceResult<Train> {
        access::require_role(self.users, actor, Role::Admin).await?;
        let patch = TrainPatch {
            name: optional("name", req.name.as_deref())?,
            start_station: req.start_station,
            end_station: req.end_station,
            departure_time: req.departure_time,
        };
        ensure_stations(self.stations, patch.station_refs()).await?;
        self.trains
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Train {id} not found !")))
    }
}
