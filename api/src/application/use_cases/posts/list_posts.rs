use crate::application::error::ServiceResult;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::listing::ListQuery;
use crate::domain::posts::post::{Post, PostSort};

pub struct ListPosts<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> ListPosts<'a, P> {
    pub async fn execute(&self, query: &ListQuery<PostSort>) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.list(query).await?)
    }
}
