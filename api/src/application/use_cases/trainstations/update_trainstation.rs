use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, optional};
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::trainstations::trainstation::{Trainstation, TrainstationPatch};
use crate::domain::users::user::Role;

use super::time_of_day;

pub struct UpdateTrainstation<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub users: &'a U,
    pub stations: &'a S,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTrainstationRequest {
    pub name: Option<String>,
    pub open_hour: Option<String>,
    pub close_hour: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl<'a, U, S> UpdateTrainstation<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: TrainstationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        id: Uuid,
        req: UpdateTrainstationRequest,
    ) -> ServiceResult<Trainstation> {
        access::require_role(self.users, actor, Role::Admin).await?;
        if req.image.as_ref().is_some_and(|i| i.is_empty()) {
            return Err(ServiceError::validation("`image` cannot be empty"));
        }
        let patch = TrainstationPatch {
            name: optional("name", req.name.as_deref())?,
            open_hour: req
                .open_hour
                .as_deref()
                .map(|h| time_of_day("open_hour", h))
                .transpose()?,
            close_hour: req
                .close_hour
                .as_deref()
                .map(|h| time_of_day("close_hour", h))
                .transpose()?,
            image: req.image,
        };
        self.stations
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Trainstation {id} not found !")))
    }
}
