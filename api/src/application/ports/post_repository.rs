use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::domain::listing::ListQuery;
use crate::domain::posts::post::{NewPost, Post, PostPatch, PostSort, Reaction};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &NewPost) -> anyhow::Result<Post>;
    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Post>>;
    async fn list(&self, query: &ListQuery<PostSort>) -> anyhow::Result<Vec<Post>>;
    async fn update(&self, id: Uuid, patch: &PostPatch) -> anyhow::Result<Option<Post>>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Toggles `user_id`'s reaction as one atomic read-modify-write.
    /// `None` when no active post matches.
    async fn react(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> anyhow::Result<Option<Post>>;
}
