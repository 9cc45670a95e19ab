use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    routing::post,
};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::trainstations::create_trainstation::{
    CreateTrainstation, CreateTrainstationRequest,
};
use crate::application::use_cases::trainstations::delete_trainstation::DeleteTrainstation;
use crate::application::use_cases::trainstations::get_trainstation::GetTrainstation;
use crate::application::use_cases::trainstations::list_trainstations::ListTrainstations;
use crate::application::use_cases::trainstations::update_trainstation::{
    UpdateTrainstation, UpdateTrainstationRequest,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::trainstations::trainstation::Trainstation;
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::response::{
    ApiError, ErrorBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainstationView {
    pub id: Uuid,
    pub name: String,
    pub open_hour: String,
    pub close_hour: String,
    /// Base64 (standard alphabet) image bytes.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Trainstation> for TrainstationView {
    fn from(s: Trainstation) -> Self {
        Self {
            id: s.id,
            name: s.name,
            open_hour: s.open_hour,
            close_hour: s.close_hour,
            image: base64::engine::general_purpose::STANDARD.encode(&s.image),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainstationResponse {
    pub error: u8,
    pub message: String,
    pub trainstation: TrainstationView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainstationListResponse {
    pub error: u8,
    pub message: String,
    pub trainstations: Vec<TrainstationView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainstationDeletedResponse {
    pub error: u8,
    pub message: String,
    pub deactivated_trains: Vec<Uuid>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TrainstationMultipart {
    name: Option<String>,
    /// `HH:MM`
    open_hour: Option<String>,
    /// `HH:MM`
    close_hour: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<String>,
}

/// Fields of a station form; unknown parts are ignored.
#[derive(Debug, Default)]
struct StationForm {
    name: Option<String>,
    open_hour: Option<String>,
    close_hour: Option<String>,
    image: Option<Vec<u8>>,
}

async fn read_form(mut multipart: Multipart, max_bytes: usize) -> Result<StationForm, ApiError> {
    let mut form = StationForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("name") => form.name = Some(field.text().await?),
            Some("open_hour") => form.open_hour = Some(field.text().await?),
            Some("close_hour") => form.close_hour = Some(field.text().await?),
            Some("image") => {
                let data = field.bytes().await?;
                if data.len() > max_bytes {
                    return Err(ApiError::new(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "Image too large !",
                        format!("images are limited to {max_bytes} bytes"),
                    ));
                }
                form.image = Some(data.to_vec());
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Room for the text parts and multipart framing on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn routes(ctx: AppContext) -> Router {
    let body_limit = ctx.cfg.upload_max_bytes + FORM_OVERHEAD_BYTES;
    Router::new()
        .route("/create", post(create_trainstation))
        .route("/get", post(list_trainstations))
        .route("/get/:id", post(get_trainstation))
        .route("/update/:id", post(update_trainstation))
        .route("/delete/:id", post(delete_trainstation))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(ctx)
}

fn station_response(
    status: StatusCode,
    message: &str,
    station: Trainstation,
) -> (StatusCode, Json<TrainstationResponse>) {
    (
        status,
        Json(TrainstationResponse {
            error: OK,
            message: message.to_string(),
            trainstation: station.into(),
        }),
    )
}

#[utoipa::path(post, path = "/trainstations/create", tag = "Trainstations",
    request_body(content = TrainstationMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = TrainstationResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn create_trainstation(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<TrainstationResponse>), ApiError> {
    let form = read_form(multipart?, ctx.cfg.upload_max_bytes).await?;
    let users = ctx.user_repo();
    let stations = ctx.trainstation_repo();
    let uc = CreateTrainstation {
        users: users.as_ref(),
        stations: stations.as_ref(),
    };
    let req = CreateTrainstationRequest {
        name: form.name.unwrap_or_default(),
        open_hour: form.open_hour.unwrap_or_default(),
        close_hour: form.close_hour.unwrap_or_default(),
        image: form.image.unwrap_or_default(),
    };
    let station = uc
        .execute(&actor, req)
        .await
        .map_err(failed("creating the trainstation"))?;
    Ok(station_response(
        StatusCode::CREATED,
        "Trainstation created !",
        station,
    ))
}

#[utoipa::path(post, path = "/trainstations/get", tag = "Trainstations", params(ListParams), security(()),
    responses((status = 202, body = TrainstationListResponse)))]
pub async fn list_trainstations(
    State(ctx): State<AppContext>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<TrainstationListResponse>), ApiError> {
    let stations = ctx.trainstation_repo();
    let uc = ListTrainstations {
        stations: stations.as_ref(),
    };
    let items = uc
        .execute(&params.to_query())
        .await
        .map_err(failed("getting trainstations"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TrainstationListResponse {
            error: OK,
            message: "Trainstations found !".into(),
            trainstations: items.into_iter().map(TrainstationView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/trainstations/get/{id}", tag = "Trainstations", security(()),
    params(("id" = Uuid, Path, description = "Trainstation id")),
    responses((status = 202, body = TrainstationResponse), (status = 404, body = ErrorBody)))]
pub async fn get_trainstation(
    State(ctx): State<AppContext>,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TrainstationResponse>), ApiError> {
    let stations = ctx.trainstation_repo();
    let uc = GetTrainstation {
        stations: stations.as_ref(),
    };
    let station = uc
        .execute(id)
        .await
        .map_err(failed("getting the trainstation"))?;
    Ok(station_response(
        StatusCode::ACCEPTED,
        "Trainstation found !",
        station,
    ))
}

#[utoipa::path(post, path = "/trainstations/update/{id}", tag = "Trainstations",
    params(("id" = Uuid, Path, description = "Trainstation id")),
    request_body(content = TrainstationMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 202, body = TrainstationResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_trainstation(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<TrainstationResponse>), ApiError> {
    let form = read_form(multipart?, ctx.cfg.upload_max_bytes).await?;
    let users = ctx.user_repo();
    let stations = ctx.trainstation_repo();
    let uc = UpdateTrainstation {
        users: users.as_ref(),
        stations: stations.as_ref(),
    };
    let req = UpdateTrainstationRequest {
        name: form.name,
        open_hour: form.open_hour,
        close_hour: form.close_hour,
        image: form.image,
    };
    let station = uc
        .execute(&actor, id, req)
        .await
        .map_err(failed("updating the trainstation"))?;
    Ok(station_response(
        StatusCode::ACCEPTED,
        "Trainstation updated !",
        station,
    ))
}

#[utoipa::path(post, path = "/trainstations/delete/{id}", tag = "Trainstations",
    params(("id" = Uuid, Path, description = "Trainstation id")),
    responses(
        (status = 202, body = TrainstationDeletedResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_trainstation(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TrainstationDeletedResponse>), ApiError> {
    let users = ctx.user_repo();
    let stations = ctx.trainstation_repo();
    let trains = ctx.train_repo();
    let uc = DeleteTrainstation {
        users: users.as_ref(),
        stations: stations.as_ref(),
        trains: trains.as_ref(),
    };
    let deleted = uc
        .execute(&actor, id)
        .await
        .map_err(failed("deleting the trainstation"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TrainstationDeletedResponse {
            error: OK,
            message: "Trainstation deleted !".into(),
            deactivated_trains: deleted.deactivated_trains,
        }),
    ))
}
