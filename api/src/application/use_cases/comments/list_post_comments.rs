use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::comments::comment::Comment;

pub struct ListPostComments<'a, P, C>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub posts: &'a P,
    pub comments: &'a C,
}

impl<'a, P, C> ListPostComments<'a, P, C>
where
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    /// Live comments of a live post, oldest first.
    pub async fn execute(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        self.posts
            .find_by_id(post_id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Post {post_id} not found !")))?;
        Ok(self
            .comments
            .list_for_post(post_id, RecordScope::Active)
            .await?)
    }
}
