use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::domain::comments::comment::{Comment, CommentPatch, CommentSort, NewComment};
use crate::domain::listing::ListQuery;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Comment>;
    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Comment>>;
    async fn list(&self, query: &ListQuery<CommentSort>) -> anyhow::Result<Vec<Comment>>;
    async fn list_for_post(&self, post_id: Uuid, scope: RecordScope)
    -> anyhow::Result<Vec<Comment>>;
    async fn update(&self, id: Uuid, patch: &CommentPatch) -> anyhow::Result<Option<Comment>>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
