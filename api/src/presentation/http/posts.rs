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
use crate::application::use_cases::comments::create_comment::CreateComment;
use crate::application::use_cases::comments::list_post_comments::ListPostComments;
use crate::application::use_cases::posts::create_post::{CreatePost, CreatePostRequest as CreateDto};
use crate::application::use_cases::posts::delete_post::DeletePost;
use crate::application::use_cases::posts::get_post::GetPost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::application::use_cases::posts::react_to_post::ReactToPost;
use crate::application::use_cases::posts::update_post::{UpdatePost, UpdatePostRequest as UpdateDto};
use crate::bootstrap::app_context::AppContext;
use crate::domain::posts::post::{Post, Reaction};
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::comments::{CommentListResponse, CommentResponse, CommentView};
use crate::presentation::http::response::{
    ApiError, ErrorBody, JsonBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub likes: i64,
    pub dislikes: i64,
    pub liked_by: Vec<Uuid>,
    pub disliked_by: Vec<Uuid>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            author: p.author_id,
            likes: p.likes,
            dislikes: p.dislikes,
            liked_by: p.liked_by,
            disliked_by: p.disliked_by,
            tags: p.tags,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub error: u8,
    pub message: String,
    pub post: PostView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub error: u8,
    pub message: String,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostDeletedResponse {
    pub error: u8,
    pub message: String,
    pub deleted_comments: Vec<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CommentRequest {
    pub content: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/create", post(create_post))
        .route("/get", post(list_posts))
        .route("/get/:id", post(get_post))
        .route("/update/:id", post(update_post))
        .route("/delete/:id", post(delete_post))
        .route("/like/:id", post(like_post))
        .route("/dislike/:id", post(dislike_post))
        .route("/comment/:id", post(comment_post))
        .route("/comments/:id", post(list_post_comments))
        .with_state(ctx)
}

fn post_response(status: StatusCode, message: &str, post: Post) -> (StatusCode, Json<PostResponse>) {
    (
        status,
        Json(PostResponse {
            error: OK,
            message: message.to_string(),
            post: post.into(),
        }),
    )
}

#[utoipa::path(post, path = "/posts/create", tag = "Posts", request_body = CreatePostRequest, responses(
    (status = 201, body = PostResponse),
    (status = 401, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let uc = CreatePost {
        users: users.as_ref(),
        posts: posts.as_ref(),
    };
    let dto = CreateDto {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };
    let post = uc
        .execute(&actor, &dto)
        .await
        .map_err(failed("creating the post"))?;
    Ok(post_response(StatusCode::CREATED, "Post created !", post))
}

#[utoipa::path(post, path = "/posts/get", tag = "Posts", params(ListParams), security(()),
    responses((status = 202, body = PostListResponse)))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<PostListResponse>), ApiError> {
    let posts = ctx.post_repo();
    let uc = ListPosts {
        posts: posts.as_ref(),
    };
    let items = uc
        .execute(&params.to_query())
        .await
        .map_err(failed("getting posts"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(PostListResponse {
            error: OK,
            message: "Posts found !".into(),
            posts: items.into_iter().map(PostView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/posts/get/{id}", tag = "Posts", security(()),
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = PostResponse), (status = 404, body = ErrorBody)))]
pub async fn get_post(
    State(ctx): State<AppContext>,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let posts = ctx.post_repo();
    let uc = GetPost {
        posts: posts.as_ref(),
    };
    let post = uc.execute(id).await.map_err(failed("getting the post"))?;
    Ok(post_response(StatusCode::ACCEPTED, "Post found !", post))
}

#[utoipa::path(post, path = "/posts/update/{id}", tag = "Posts", request_body = UpdatePostRequest,
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = PostResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    JsonBody(req): JsonBody<UpdatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let uc = UpdatePost {
        users: users.as_ref(),
        posts: posts.as_ref(),
    };
    let dto = UpdateDto {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };
    let post = uc
        .execute(&actor, id, &dto)
        .await
        .map_err(failed("updating the post"))?;
    Ok(post_response(StatusCode::ACCEPTED, "Post updated !", post))
}

#[utoipa::path(post, path = "/posts/delete/{id}", tag = "Posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = PostDeletedResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<PostDeletedResponse>), ApiError> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let uc = DeletePost {
        users: users.as_ref(),
        posts: posts.as_ref(),
        comments: comments.as_ref(),
    };
    let deleted = uc
        .execute(&actor, id)
        .await
        .map_err(failed("deleting the post"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(PostDeletedResponse {
            error: OK,
            message: "Post deleted !".into(),
            deleted_comments: deleted.deleted_comments,
        }),
    ))
}

async fn apply_reaction(
    ctx: &AppContext,
    actor: &Principal,
    id: Uuid,
    reaction: Reaction,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let uc = ReactToPost {
        users: users.as_ref(),
        posts: posts.as_ref(),
    };
    let (action, message) = match reaction {
        Reaction::Like => ("liking the post", "Post liked !"),
        Reaction::Dislike => ("disliking the post", "Post disliked !"),
    };
    let post = uc
        .execute(actor, id, reaction)
        .await
        .map_err(failed(action))?;
    Ok(post_response(StatusCode::ACCEPTED, message, post))
}

#[utoipa::path(post, path = "/posts/like/{id}", tag = "Posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = PostResponse), (status = 404, body = ErrorBody)))]
pub async fn like_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    apply_reaction(&ctx, &actor, id, Reaction::Like).await
}

#[utoipa::path(post, path = "/posts/dislike/{id}", tag = "Posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = PostResponse), (status = 404, body = ErrorBody)))]
pub async fn dislike_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    apply_reaction(&ctx, &actor, id, Reaction::Dislike).await
}

#[utoipa::path(post, path = "/posts/comment/{id}", tag = "Posts", request_body = CommentRequest,
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 201, body = CommentResponse), (status = 404, body = ErrorBody)))]
pub async fn comment_post(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let users = ctx.user_repo();
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let uc = CreateComment {
        users: users.as_ref(),
        posts: posts.as_ref(),
        comments: comments.as_ref(),
    };
    let comment = uc
        .execute(&actor, id, &req.content)
        .await
        .map_err(failed("commenting the post"))?;
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            error: OK,
            message: "Comment created !".into(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/posts/comments/{id}", tag = "Posts", security(()),
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 202, body = CommentListResponse), (status = 404, body = ErrorBody)))]
pub async fn list_post_comments(
    State(ctx): State<AppContext>,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<CommentListResponse>), ApiError> {
    let posts = ctx.post_repo();
    let comments = ctx.comment_repo();
    let uc = ListPostComments {
        posts: posts.as_ref(),
        comments: comments.as_ref(),
    };
    let items = uc
        .execute(id)
        .await
        .map_err(failed("getting the post comments"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(CommentListResponse {
            error: OK,
            message: "Comments found !".into(),
            comments: items.into_iter().map(CommentView::from).collect(),
        }),
    ))
}
