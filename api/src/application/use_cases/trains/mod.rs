pub mod create_train;
pub mod delete_train;
pub mod get_train;
pub mod list_trains;
pub mod set_train_active;
pub mod update_train;

use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::trainstation_repository::TrainstationRepository;

/// Station references must point at live stations.
async fn ensure_stations<S>(stations: &S, ids: impl IntoIterator<Item = Uuid>) -> ServiceResult<()>
where
    S: TrainstationRepository + ?Sized,
{
    for id in ids {
        if stations.find_by_id(id, RecordScope::Active).await?.is_none() {
            return Err(ServiceError::validation(
                "Start station or end station invalid or deleted !",
            ));
        }
    }
    Ok(())
}
