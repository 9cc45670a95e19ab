use crate::application::error::ServiceResult;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::domain::listing::ListQuery;
use crate::domain::trainstations::trainstation::{Trainstation, TrainstationSort};

pub struct ListTrainstations<'a, S: TrainstationRepository + ?Sized> {
    pub stations: &'a S,
}

impl<'a, S: TrainstationRepository + ?Sized> ListTrainstations<'a, S> {
    pub async fn execute(
        &self,
        query: &ListQuery<TrainstationSort>,
    ) -> ServiceResult<Vec<Trainstation>> {
        Ok(self.stations.list(query).await?)
    }
}
