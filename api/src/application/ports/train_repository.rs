use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::domain::listing::ListQuery;
use crate::domain::trains::train::{NewTrain, Train, TrainPatch, TrainSort};

#[async_trait]
pub trait TrainRepository: Send + Sync {
    async fn create(&self, train: &NewTrain) -> anyhow::Result<Train>;
    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Train>>;
    async fn list(&self, query: &ListQuery<TrainSort>) -> anyhow::Result<Vec<Train>>;
    async fn update(&self, id: Uuid, patch: &TrainPatch) -> anyhow::Result<Option<Train>>;
    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        scope: RecordScope,
    ) -> anyhow::Result<Option<Train>>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Ids of trains starting or ending at `station_id`.
    async fn ids_serving_station(
        &self,
        station_id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Vec<Uuid>>;
}
