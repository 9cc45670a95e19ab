use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, required};
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::trainstations::trainstation::{NewTrainstation, Trainstation};
use crate::domain::users::user::Role;

use super::time_of_day;

pub struct CreateTrainstation<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub users: &'a U,
    pub stations: &'a S,
}

#[derive(Debug, Clone, Default)]
pub struct CreateTrainstationRequest {
    pub name: String,
    pub open_hour: String,
    pub close_hour: String,
    pub image: Vec<u8>,
}

impl<'a, U, S> CreateTrainstation<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        req: CreateTrainstationRequest,
    ) -> ServiceResult<Trainstation> {
        access::require_role(self.users, actor, Role::Admin).await?;
        let name = required("name", &req.name)?;
        let open_hour = time_of_day("open_hour", &req.open_hour)?;
        let close_hour = time_of_day("close_hour", &req.close_hour)?;
        if req.image.is_empty() {
            return Err(ServiceError::validation("`image` is required"));
        }
        let station = self
            .stations
            .create(&NewTrainstation {
                name,
                open_hour,
                close_hour,
                image: req.image,
            })
            .await?;
        Ok(station)
    }
}
