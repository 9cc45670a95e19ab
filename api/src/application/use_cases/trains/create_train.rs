use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceResult, required};
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::trains::train::{NewTrain, Train};
use crate::domain::users::user::Role;

use super::ensure_stations;

pub struct CreateTrain<'a, U, T, S>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub users: &'a U,
    pub trains: &'a T,
    pub stations: &'a S,
}

#[derive(Debug, Clone)]
pub struct CreateTrainRequest {
    pub name: String,
    pub start_station: Uuid,
    pub end_station: Uuid,
    pub departure_time: DateTime<Utc>,
}

impl<'a, U, T, S> CreateTrain<'a, U, T, S>
where
    U: UserRepository + ?Sized,
    T: TrainRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, req: &CreateTrainRequest) -> ServiceResult<Train> {
        access::require_role(self.users, actor, Role::Admin).await?;
        let name = required("name", &req.name)?;
        ensure_stations(self.stations, [req.start_station, req.end_station]).await?;
        let train = self
            .trains
            .create(&NewTrain {
                name,
                start_station: req.start_station,
                end_station: req.end_station,
                departure_time: req.departure_time,
            })
            .await?;
        Ok(train)
    }
}
