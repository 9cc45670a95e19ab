pub mod create_trainstation;
pub mod delete_trainstation;
pub mod get_trainstation;
pub mod list_trainstations;
pub mod update_trainstation;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::trainstations::trainstation::normalize_time_of_day;

fn time_of_day(field: &str, raw: &str) -> ServiceResult<String> {
    normalize_time_of_day(raw)
        .ok_or_else(|| ServiceError::validation(format!("`{field}` must be formatted as HH:MM")))
}
