use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct DeleteComment<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub users: &'a U,
    pub comments: &'a C,
}

impl<'a, U, C> DeleteComment<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Principal, id: Uuid) -> ServiceResult<Uuid> {
        let acting = access::require_user(self.users, actor).await?;
        let not_found = || ServiceError::not_found(format!("Comment {id} not found !"));
        let comment = self
            .comments
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(not_found)?;
        access::ensure_owner_or_admin(&acting, comment.author_id)?;
        if !self.comments.soft_delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(comment_id = %id, deleted_by = %acting.id, "comment_soft_deleted");
        Ok(id)
    }
}
