use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::comments::comment::Comment;

pub struct GetComment<'a, C: CommentRepository + ?Sized> {
    pub comments: &'a C,
}

impl<'a, C: CommentRepository + ?Sized> GetComment<'a, C> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Comment> {
        self.comments
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Comment {id} not found !")))
    }
}
