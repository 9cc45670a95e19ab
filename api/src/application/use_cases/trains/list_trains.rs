use crate::application::error::ServiceResult;
use crate::application::ports::train_repository::TrainRepository;
use crate::domain::listing::ListQuery;
use crate::domain::trains::train::{Train, TrainSort};

pub struct ListTrains<'a, T: TrainRepository + ?Sized> {
    pub trains: &'a T,
}

impl<'a, T: TrainRepository + ?Sized> ListTrains<'a, T> {
    pub async fn execute(&self, query: &ListQuery<TrainSort>) -> ServiceResult<Vec<Train>> {
        Ok(self.trains.list(query).await?)
    }
}
