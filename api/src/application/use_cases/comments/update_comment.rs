use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult, optional};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::comments::comment::{Comment, CommentPatch};

pub struct UpdateComment<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub users: &'a U,
    pub comments: &'a C,
}

impl<'a, U, C> UpdateComment<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        id: Uuid,
        content: Option<&str>,
    ) -> ServiceResult<Comment> {
        let acting = access::require_user(self.users, actor).await?;
        let not_found = || ServiceError::not_found(format!("Comment {id} not found !"));
        let comment = self
            .comments
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(not_found)?;
        access::ensure_owner_or_admin(&acting, comment.author_id)?;
        let patch = CommentPatch {
            content: optional("content", content)?,
        };
        self.comments.update(id, &patch).await?.ok_or_else(not_found)
    }
}
