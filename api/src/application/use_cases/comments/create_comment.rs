use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, required};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::comments::comment::{Comment, NewComment};

pub struct CreateComment<'a, U, P, C>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
    pub comments: &'a C,
}

impl<'a, U, P, C> CreateComment<'a, U, P, C>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        post_id: Uuid,
        content: &str,
    ) -> ServiceResult<Comment> {
        let author = access::require_user(self.users, actor).await?;
        let content = required("content", content)?;
        self.posts
            .find_by_id(post_id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Post {post_id} not found !")))?;
        let comment = self
            .comments
            .create(&NewComment {
                content,
                author_id: author.id,
                post_id,
            })
            .await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, author_id = %author.id, "comment_created");
        Ok(comment)
    }
}
