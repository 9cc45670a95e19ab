use uuid::Uuid;

use crate::application::access::{self, Principal};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::posts::post::{Post, Reaction};

pub struct ReactToPost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub users: &'a U,
    pub posts: &'a P,
}

impl<'a, U, P> ReactToPost<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Principal,
        id: Uuid,
        reaction: Reaction,
    ) -> ServiceResult<Post> {
        let user = access::require_user(self.users, actor).await?;
        let post = self
            .posts
            .react(id, user.id, reaction)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Post {id} not found !")))?;
        tracing::debug!(post_id = %id, user_id = %user.id, ?reaction, state = ?post.reaction_of(user.id), "post_reaction");
        Ok(post)
    }
}
