use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::Principal;
use crate::application::error::ServiceError;
use crate::application::use_cases::trains::create_train::{CreateTrain, CreateTrainRequest as CreateDto};
use crate::application::use_cases::trains::delete_train::DeleteTrain;
use crate::application::use_cases::trains::get_train::GetTrain;
use crate::application::use_cases::trains::list_trains::ListTrains;
use crate::application::use_cases::trains::set_train_active::SetTrainActive;
use crate::application::use_cases::trains::update_train::{UpdateTrain, UpdateTrainRequest as UpdateDto};
use crate::bootstrap::app_context::AppContext;
use crate::domain::trains::train::Train;
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::response::{
    Ack, ApiError, ErrorBody, JsonBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainView {
    pub id: Uuid,
    pub name: String,
    pub start_station: Uuid,
    pub end_station: Uuid,
    pub departure_time: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Train> for TrainView {
    fn from(t: Train) -> Self {
        Self {
            id: t.id,
            name: t.name,
            start_station: t.start_station,
            end_station: t.end_station,
            departure_time: t.departure_time,
            active: t.active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainResponse {
    pub error: u8,
    pub message: String,
    pub train: TrainView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainListResponse {
    pub error: u8,
    pub message: String,
    pub trains: Vec<TrainView>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateTrainRequest {
    pub name: String,
    pub start_station: Option<Uuid>,
    pub end_station: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTrainRequest {
    pub name: Option<String>,
    pub start_station: Option<Uuid>,
    pub end_station: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/create", post(create_train))
        .route("/get", post(list_trains))
        .route("/get/:id", post(get_train))
        .route("/update/:id", post(update_train))
        .route("/delete/:id", post(delete_train))
        .route("/set/activate/:id", post(activate_train))
        .route("/set/deactivate/:id", post(deactivate_train))
        .with_state(ctx)
}

fn train_response(status: StatusCode, message: &str, train: Train) -> (StatusCode, Json<TrainResponse>) {
    (
        status,
        Json(TrainResponse {
            error: OK,
            message: message.to_string(),
            train: train.into(),
        }),
    )
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ApiError::from_service(
            ServiceError::validation(format!("`{field}` is required")),
            "creating the train",
        )
    })
}

#[utoipa::path(post, path = "/trains/create", tag = "Trains", request_body = CreateTrainRequest, responses(
    (status = 201, body = TrainResponse),
    (status = 403, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn create_train(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    JsonBody(req): JsonBody<CreateTrainRequest>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    let dto = CreateDto {
        name: req.name,
        start_station: require("start_station", req.start_station)?,
        end_station: require("end_station", req.end_station)?,
        departure_time: require("departure_time", req.departure_time)?,
    };
    let users = ctx.user_repo();
    let trains = ctx.train_repo();
    let stations = ctx.trainstation_repo();
    let uc = CreateTrain {
        users: users.as_ref(),
        trains: trains.as_ref(),
        stations: stations.as_ref(),
    };
    let train = uc
        .execute(&actor, &dto)
        .await
        .map_err(failed("creating the train"))?;
    Ok(train_response(StatusCode::CREATED, "Train created !", train))
}

#[utoipa::path(post, path = "/trains/get", tag = "Trains", params(ListParams), security(()),
    responses((status = 202, body = TrainListResponse)))]
pub async fn list_trains(
    State(ctx): State<AppContext>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<TrainListResponse>), ApiError> {
    let trains = ctx.train_repo();
    let uc = ListTrains {
        trains: trains.as_ref(),
    };
    let items = uc
        .execute(&params.to_query())
        .await
        .map_err(failed("getting trains"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TrainListResponse {
            error: OK,
            message: "Trains found !".into(),
            trains: items.into_iter().map(TrainView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/trains/get/{id}", tag = "Trains", security(()),
    params(("id" = Uuid, Path, description = "Train id")),
    responses((status = 202, body = TrainResponse), (status = 404, body = ErrorBody)))]
pub async fn get_train(
    State(ctx): State<AppContext>,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    let trains = ctx.train_repo();
    let uc = GetTrain {
        trains: trains.as_ref(),
    };
    let train = uc.execute(id).await.map_err(failed("getting the train"))?;
    Ok(train_response(StatusCode::ACCEPTED, "Train found !", train))
}

#[utoipa::path(post, path = "/trains/update/{id}", tag = "Trains", request_body = UpdateTrainRequest,
    params(("id" = Uuid, Path, description = "Train id")),
    responses((status = 202, body = TrainResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_train(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    JsonBody(req): JsonBody<UpdateTrainRequest>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    let users = ctx.user_repo();
    let trains = ctx.train_repo();
    let stations = ctx.trainstation_repo();
    let uc = UpdateTrain {
        users: users.as_ref(),
        trains: trains.as_ref(),
        stations: stations.as_ref(),
    };
    let dto = UpdateDto {
        name: req.name,
        start_station: req.start_station,
        end_station: req.end_station,
        departure_time: req.departure_time,
    };
    let train = uc
        .execute(&actor, id, &dto)
        .await
        .map_err(failed("updating the train"))?;
    Ok(train_response(StatusCode::ACCEPTED, "Train updated !", train))
}

#[utoipa::path(post, path = "/trains/delete/{id}", tag = "Trains",
    params(("id" = Uuid, Path, description = "Train id")),
    responses((status = 202, body = Ack), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_train(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let users = ctx.user_repo();
    let trains = ctx.train_repo();
    let uc = DeleteTrain {
        users: users.as_ref(),
        trains: trains.as_ref(),
    };
    uc.execute(&actor, id)
        .await
        .map_err(failed("deleting the train"))?;
    Ok((StatusCode::ACCEPTED, Json(Ack::new("Train deleted !"))))
}

async fn apply_active(
    ctx: &AppContext,
    actor: &Principal,
    id: Uuid,
    active: bool,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    let users = ctx.user_repo();
    let trains = ctx.train_repo();
    let uc = SetTrainActive {
        users: users.as_ref(),
        trains: trains.as_ref(),
    };
    let train = uc
        .execute(actor, id, active)
        .await
        .map_err(failed("changing the train status"))?;
    let message = if active {
        "Train activated !"
    } else {
        "Train deactivated !"
    };
    Ok(train_response(StatusCode::ACCEPTED, message, train))
}

#[utoipa::path(post, path = "/trains/set/activate/{id}", tag = "Trains",
    params(("id" = Uuid, Path, description = "Train id")),
    responses((status = 202, body = TrainResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn activate_train(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    apply_active(&ctx, &actor, id, true).await
}

#[utoipa::path(post, path = "/trains/set/deactivate/{id}", tag = "Trains",
    params(("id" = Uuid, Path, description = "Train id")),
    responses((status = 202, body = TrainResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn deactivate_train(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    apply_active(&ctx, &actor, id, false).await
}
