use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::domain::listing::ListQuery;
use crate::domain::trainstations::trainstation::{
    NewTrainstation, Trainstation, TrainstationPatch, TrainstationSort,
};

#[async_trait]
pub trait TrainstationRepository: Send + Sync {
    async fn create(&self, station: &NewTrainstation) -> anyhow::Result<Trainstation>;
    async fn find_by_id(&self, id: Uuid, scope: RecordScope)
    -> anyhow::Result<Option<Trainstation>>;
    async fn list(&self, query: &ListQuery<TrainstationSort>) -> anyhow::Result<Vec<Trainstation>>;
    async fn update(
        &self,
        id: Uuid,
        patch: &TrainstationPatch,
    ) -> anyhow::Result<Option<Trainstation>>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
