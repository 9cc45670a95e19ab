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
use crate::application::use_cases::auth::login::{Login, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{Register, RegisterRequest as RegisterDto};
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::set_role::SetUserRole;
use crate::application::use_cases::users::update_user::{UpdateUser, UpdateUserRequest as UpdateDto};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::response::{
    Ack, ApiError, ErrorBody, JsonBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub pseudo: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            pseudo: u.pseudo,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub error: u8,
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub error: u8,
    pub message: String,
    pub users: Vec<UserView>,
}

// Missing fields deserialize empty and fail validation like blank ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub pseudo: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub error: u8,
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub pseudo: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", post(me))
        .route("/get", post(list_users))
        .route("/get/:id", post(get_user))
        .route("/update", post(update_self))
        .route("/update/:id", post(update_user))
        .route("/delete", post(delete_self))
        .route("/delete/:id", post(delete_user))
        .route("/set/admin/:id", post(set_admin))
        .route("/set/employee/:id", post(set_employee))
        .route("/set/user/:id", post(set_user))
        .with_state(ctx)
}

fn user_response(status: StatusCode, message: &str, user: User) -> (StatusCode, Json<UserResponse>) {
    (
        status,
        Json(UserResponse {
            error: OK,
            message: message.to_string(),
            user: user.into(),
        }),
    )
}

#[utoipa::path(post, path = "/users/register", tag = "Users", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = UserResponse),
    (status = 400, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = Register {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        pseudo: req.pseudo,
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await.map_err(failed("creating the user"))?;
    Ok(user_response(StatusCode::CREATED, "User created !", user))
}

#[utoipa::path(post, path = "/users/login", tag = "Users", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 404, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = ctx.user_repo();
    let tokens = ctx.access_tokens();
    let uc = Login {
        repo: repo.as_ref(),
        tokens: tokens.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    // Bad credentials answer 404 on this route, like an unknown record.
    let outcome = uc.execute(&dto).await.map_err(|err| match err {
        ServiceError::Auth(msg) => ApiError::new(StatusCode::NOT_FOUND, "Error while logging in !", msg),
        other => failed("logging in")(other),
    })?;
    Ok(Json(LoginResponse {
        error: OK,
        message: "Logged in !".into(),
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: outcome.user.into(),
    }))
}

#[utoipa::path(post, path = "/users/me", tag = "Users", responses(
    (status = 202, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&actor)
        .await
        .map_err(failed("getting the current user"))?;
    Ok(user_response(StatusCode::ACCEPTED, "User found !", user))
}

#[utoipa::path(post, path = "/users/get", tag = "Users", params(ListParams), responses(
    (status = 202, body = UserListResponse),
    (status = 403, body = ErrorBody)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<UserListResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc
        .execute(&actor, &params.to_query())
        .await
        .map_err(failed("getting users"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(UserListResponse {
            error: OK,
            message: "Users found !".into(),
            users: users.into_iter().map(UserView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/users/get/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = UserResponse), (status = 404, body = ErrorBody)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&actor, id)
        .await
        .map_err(failed("getting the user"))?;
    Ok(user_response(StatusCode::ACCEPTED, "User found !", user))
}

async fn apply_update(
    ctx: &AppContext,
    actor: &Principal,
    target: Option<Uuid>,
    req: UpdateUserRequest,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = UpdateUser {
        repo: repo.as_ref(),
    };
    let dto = UpdateDto {
        pseudo: req.pseudo,
        email: req.email,
        password: req.password,
    };
    let user = uc
        .execute(actor, target, &dto)
        .await
        .map_err(failed("updating the user"))?;
    Ok(user_response(StatusCode::ACCEPTED, "User updated !", user))
}

#[utoipa::path(post, path = "/users/update", tag = "Users", request_body = UpdateUserRequest, responses(
    (status = 202, body = UserResponse), (status = 404, body = ErrorBody)))]
pub async fn update_self(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    apply_update(&ctx, &actor, None, req).await
}

#[utoipa::path(post, path = "/users/update/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = UserResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    apply_update(&ctx, &actor, Some(id), req).await
}

async fn apply_delete(
    ctx: &AppContext,
    actor: &Principal,
    target: Option<Uuid>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let repo = ctx.user_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
    };
    uc.execute(actor, target)
        .await
        .map_err(failed("deleting the user"))?;
    Ok((StatusCode::ACCEPTED, Json(Ack::new("User deleted !"))))
}

#[utoipa::path(post, path = "/users/delete", tag = "Users", responses(
    (status = 202, body = Ack), (status = 404, body = ErrorBody)))]
pub async fn delete_self(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    apply_delete(&ctx, &actor, None).await
}

#[utoipa::path(post, path = "/users/delete/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = Ack), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    apply_delete(&ctx, &actor, Some(id)).await
}

async fn apply_role(
    ctx: &AppContext,
    actor: &Principal,
    id: Uuid,
    role: Role,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = SetUserRole {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(actor, id, role)
        .await
        .map_err(failed("changing the user role"))?;
    Ok(user_response(
        StatusCode::ACCEPTED,
        &format!("User is now {role} !"),
        user,
    ))
}

#[utoipa::path(post, path = "/users/set/admin/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = UserResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn set_admin(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    apply_role(&ctx, &actor, id, Role::Admin).await
}

#[utoipa::path(post, path = "/users/set/employee/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = UserResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn set_employee(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    apply_role(&ctx, &actor, id, Role::Employee).await
}

#[utoipa::path(post, path = "/users/set/user/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 202, body = UserResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn set_user(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    apply_role(&ctx, &actor, id, Role::User).await
}
