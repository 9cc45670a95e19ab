use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::Role;

pub struct DeleteTrainstation<'a, U, S, T>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    pub users: &'a U,
    pub stations: &'a S,
    pub trains: &'a T,
}

#[derive(Debug, Clone)]
pub struct DeletedTrainstation {
    pub id: Uuid,
    pub deactivated_trains: Vec<Uuid>,
}

impl<'a, U, S, T> DeleteTrainstation<'a, U, S, T>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
    T: TrainRepository + ?Sized,
{
    /// Soft-deletes the station, then deactivates every train that starts or
    /// ends there. The cascade is best effort: a train that cannot be updated
    /// is logged and skipped, and the station stays deleted.
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<DeletedTrainstation> {
        access::require_role(self.users, actor, Role::Admin).await?;
        if !self.stations.soft_delete(id).await? {
            return Err(ServiceError::not_found(format!(
                "Trainstation {id} not found !"
            )));
        }

        let mut deactivated_trains = Vec::new();
        let train_ids = match self
            .trains
            .ids_serving_station(id, RecordScope::IncludeDeleted)
            .await
        {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(station_id = %id, error = ?err, "station_cascade_lookup_failed");
                Vec::new()
            }
        };
        for train_id in train_ids {
            match self
                .trains
                .set_active(train_id, false, RecordScope::IncludeDeleted)
                .await
            {
                Ok(Some(_)) => deactivated_trains.push(train_id),
                Ok(None) => {
                    tracing::warn!(station_id = %id, train_id = %train_id, "station_cascade_train_vanished")
                }
                Err(err) => {
                    tracing::warn!(station_id = %id, train_id = %train_id, error = ?err, "station_cascade_deactivate_failed")
                }
            }
        }
        tracing::info!(station_id = %id, deactivated = deactivated_trains.len(), "trainstation_soft_deleted");
        Ok(DeletedTrainstation {
            id,
            deactivated_trains,
        })
    }
}
