use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct DeletePost<'a, U, P, C>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
    pub comments: &'a C,
}

#[derive(Debug, Clone)]
pub struct DeletedPost {
    pub id: Uuid,
    pub deleted_comments: Vec<Uuid>,
}

impl<'a, U, P, C> DeletePost<'a, U, P, C>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    /// Soft-deletes the post and then its live comments. Comment failures are
    /// logged and skipped.
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<DeletedPost> {
        let acting = access::require_user(self.users, actor).await?;
        let not_found = || ServiceError::not_found(format!("Post {id} not found !"));
        let post = self
            .posts
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(not_found)?;
        access::ensure_owner_or_admin(&acting, post.author_id)?;
        if !self.posts.soft_delete(id).await? {
            return Err(not_found());
        }

        let mut deleted_comments = Vec::new();
        let comments = match self.comments.list_for_post(id, RecordScope::Active).await {
            Ok(comments) => comments,
            Err(err) => {
                tracing::warn!(post_id = %id, error = ?err, "post_cascade_lookup_failed");
                Vec::new()
            }
        };
        for comment in comments {
            match self.comments.soft_delete(comment.id).await {
                Ok(true) => deleted_comments.push(comment.id),
                Ok(false) => {
                    tracing::warn!(post_id = %id, comment_id = %comment.id, "post_cascade_comment_vanished")
                }
                Err(err) => {
                    tracing::warn!(post_id = %id, comment_id = %comment.id, error = ?err, "post_cascade_delete_failed")
                }
            }
        }
        tracing::info!(post_id = %id, comments = deleted_comments.len(), deleted_by = %acting.id, "post_soft_deleted");
        Ok(DeletedPost {
            id,
            deleted_comments,
        })
    }
}
