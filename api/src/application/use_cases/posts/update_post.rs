use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, optional};
use crate::application::ports::RecordScope;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::posts::post::{Post, PostPatch};

use super::clean_tags;

pub struct UpdatePost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl<'a, U, P> UpdatePost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        id: Uuid,
        req: &UpdatePostRequest,
    ) -> ServiceResult<Post> {
        let acting = access::require_user(self.users, actor).await?;
        let not_found = || ServiceError::not_found(format!("Post {id} not found !"));
        let post = self
            .posts
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(not_found)?;
        access::ensure_owner_or_admin(&acting, post.author_id)?;

        let patch = PostPatch {
            title: optional("title", req.title.as_deref())?,
            content: optional("content", req.content.as_deref())?,
            tags: req.tags.as_deref().map(clean_tags),
        };
        self.posts.update(id, &patch).await?.ok_or_else(not_found)
    }
}
