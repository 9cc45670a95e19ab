use crate::application::error::ServiceResult;
use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::comments::comment::{Comment, CommentSort};
use crate::domain::listing::ListQuery;

pub struct ListComments<'a, C: CommentRepository + ?Sized> {
    pub comments: &'a C,
}

impl<'a, C: CommentRepository + ?Sized> ListComments<'a, C> {
    pub async fn execute(&self, query: &ListQuery<CommentSort>) -> ServiceResult<Vec<Comment>> {
        Ok(self.comments.list(query).await?)
    }
}
