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

use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::get_comment::GetComment;
use crate::application::use_cases::comments::list_comments::ListComments;
use crate::application::use_cases::comments::update_comment::UpdateComment;
use crate::bootstrap::app_context::AppContext;
use crate::domain::comments::comment::Comment;
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::response::{
    Ack, ApiError, ErrorBody, JsonBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub author: Uuid,
    pub post: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            content: c.content,
            author: c.author_id,
            post: c.post_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub error: u8,
    pub message: String,
    pub comment: CommentView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub error: u8,
    pub message: String,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/get", post(list_comments))
        .route("/get/:id", post(get_comment))
        .route("/update/:id", post(update_comment))
        .route("/delete/:id", post(delete_comment))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/comments/get", tag = "Comments", params(ListParams), security(()),
    responses((status = 202, body = CommentListResponse)))]
pub async fn list_comments(
    State(ctx): State<AppContext>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<CommentListResponse>), ApiError> {
    let comments = ctx.comment_repo();
    let uc = ListComments {
        comments: comments.as_ref(),
    };
    let items = uc
        .execute(&params.to_query())
        .await
        .map_err(failed("getting comments"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(CommentListResponse {
            error: OK,
            message: "Comments found !".into(),
            comments: items.into_iter().map(CommentView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/comments/get/{id}", tag = "Comments", security(()),
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 202, body = CommentResponse), (status = 404, body = ErrorBody)))]
pub async fn get_comment(
    State(ctx): State<AppContext>,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let comments = ctx.comment_repo();
    let uc = GetComment {
        comments: comments.as_ref(),
    };
    let comment = uc
        .execute(id)
        .await
        .map_err(failed("getting the comment"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(CommentResponse {
            error: OK,
            message: "Comment found !".into(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/comments/update/{id}", tag = "Comments", request_body = UpdateCommentRequest,
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 202, body = CommentResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_comment(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let users = ctx.user_repo();
    let comments = ctx.comment_repo();
    let uc = UpdateComment {
        users: users.as_ref(),
        comments: comments.as_ref(),
    };
    let comment = uc
        .execute(&actor, id, req.content.as_deref())
        .await
        .map_err(failed("updating the comment"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(CommentResponse {
            error: OK,
            message: "Comment updated !".into(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/comments/delete/{id}", tag = "Comments",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 202, body = Ack), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let users = ctx.user_repo();
    let comments = ctx.comment_repo();
    let uc = DeleteComment {
        users: users.as_ref(),
        comments: comments.as_ref(),
    };
    uc.execute(&actor, id)
        .await
        .map_err(failed("deleting the comment"))?;
    Ok((StatusCode::ACCEPTED, Json(Ack::new("Comment deleted !"))))
}
