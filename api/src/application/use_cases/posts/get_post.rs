use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::RecordScope;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::Post;

pub struct GetPost<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> GetPost<'a, P> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Post> {
        self.posts
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Post {id} not found !")))
    }
}
