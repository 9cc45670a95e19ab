use crate::application::access::{self, Principal};
use crate::application::error::{ServiceResult, required};
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::posts::post::{NewPost, Post};

use super::clean_tags;

pub struct CreatePost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl<'a, U, P> CreatePost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, req: &CreatePostRequest) -> ServiceResult<Post> {
        let author = access::require_user(self.users, actor).await?;
        let post = self
            .posts
            .create(&NewPost {
                title: required("title", &req.title)?,
                content: required("content", &req.content)?,
                author_id: author.id,
                tags: clean_tags(&req.tags),
            })
            .await?;
        tracing::info!(post_id = %post.id, author_id = %author.id, "post_created");
        Ok(post)
    }
}
