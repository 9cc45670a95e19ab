use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::domain::listing::ListQuery;
use crate::domain::users::user::{NewUser, Role, User, UserPatch, UserSort};

/// Writes fail with [`DuplicateKey`](crate::application::ports::DuplicateKey)
/// when `pseudo` or `email` is already taken.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str, scope: RecordScope)
    -> anyhow::Result<Option<User>>;
    async fn list(&self, query: &ListQuery<UserSort>) -> anyhow::Result<Vec<User>>;
    async fn update(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<Option<User>>;
    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>>;
    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
