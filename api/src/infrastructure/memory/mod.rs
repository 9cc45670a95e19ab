//! In-process store used for development and tests. Nothing survives a
//! restart.

mod repositories;
mod table;

pub use repositories::{
    MemoryCommentRepository, MemoryPostRepository, MemoryTicketRepository, MemoryTrainRepository,
    MemoryTrainstationRepository, MemoryUserRepository,
};

use async_trait::async_trait;

use crate::application::ports::store_health::StoreHealth;

pub struct MemoryStoreHealth;

#[async_trait]
impl StoreHealth for MemoryStoreHealth {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::application::ports::post_repository::PostRepository;
    use crate::application::ports::user_repository::UserRepository;
    use crate::application::ports::{DuplicateKey, RecordScope};
    use crate::domain::listing::ListQuery;
    use crate::domain::posts::post::{NewPost, Reaction};
    use crate::domain::users::user::{NewUser, Role, UserPatch, UserSort};

    fn new_user(pseudo: &str, email: &str) -> NewUser {
        NewUser {
            pseudo: pseudo.into(),
            email: email.into(),
            password_hash: "h".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_as_duplicate_key() {
        let users = MemoryUserRepository::default();
        users.create_user(&new_user("alice", "a@x.com")).await.unwrap();
        let err = users
            .create_user(&new_user("alice2", "a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DuplicateKey>().unwrap().0, "email");

        let bob = users.create_user(&new_user("bob", "b@x.com")).await.unwrap();
        let patch = UserPatch {
            pseudo: Some("alice".into()),
            ..Default::default()
        };
        assert!(UserRepository::update(&users, bob.id, &patch).await.is_err());
    }

    #[tokio::test]
    async fn role_sort_follows_privilege() {
        let users = MemoryUserRepository::default();
        let admin = users.create_user(&new_user("a", "a@x.com")).await.unwrap();
        let clerk = users.create_user(&new_user("c", "c@x.com")).await.unwrap();
        let plain = users.create_user(&new_user("p", "p@x.com")).await.unwrap();
        users.set_role(admin.id, Role::Admin).await.unwrap();
        users.set_role(clerk.id, Role::Employee).await.unwrap();

        let query: ListQuery<UserSort> = ListQuery::parse(Some("-role"), None);
        let listed = UserRepository::list(&users, &query).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![admin.id, clerk.id, plain.id]);
    }

    #[tokio::test]
    async fn deleted_users_leave_lists_and_lookups() {
        let users = MemoryUserRepository::default();
        let a = users.create_user(&new_user("a", "a@x.com")).await.unwrap();
        users.create_user(&new_user("b", "b@x.com")).await.unwrap();
        assert!(UserRepository::soft_delete(&users, a.id).await.unwrap());
        assert!(!UserRepository::soft_delete(&users, a.id).await.unwrap());

        let listed = UserRepository::list(&users, &ListQuery::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(
            users
                .find_by_email("a@x.com", RecordScope::Active)
                .await
                .unwrap()
                .is_none()
        );
        let kept = UserRepository::find_by_id(&users, a.id, RecordScope::IncludeDeleted)
            .await
            .unwrap()
            .unwrap();
        assert!(kept.deleted_at.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reactions_keep_counters_consistent() {
        let posts = Arc::new(MemoryPostRepository::default());
        let post = posts
            .create(&NewPost {
                title: "t".into(),
                content: "c".into(),
                author_id: Uuid::new_v4(),
                tags: vec![],
            })
            .await
            .unwrap();

        let users: Vec<Uuid> = (0..16).map(|_| Uuid::new_v4()).collect();
        let mut handles = Vec::new();
        for (i, user) in users.iter().copied().enumerate() {
            let posts = posts.clone();
            handles.push(tokio::spawn(async move {
                // Odd users end on dislike, even users end on like.
                posts.react(post.id, user, Reaction::Dislike).await.unwrap();
                posts.react(post.id, user, Reaction::Like).await.unwrap();
                if i % 2 == 1 {
                    posts.react(post.id, user, Reaction::Dislike).await.unwrap();
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let post = posts
            .find_by_id(post.id, RecordScope::Active)
            .await
            .unwrap()
            .unwrap();
        assert!(post.reactions_consistent());
        assert_eq!((post.likes, post.dislikes), (8, 8));
    }

    #[tokio::test]
    async fn reacting_to_deleted_post_finds_nothing() {
        let posts = MemoryPostRepository::default();
        let post = posts
            .create(&NewPost {
                title: "t".into(),
                content: "c".into(),
                author_id: Uuid::new_v4(),
                tags: vec![],
            })
            .await
            .unwrap();
        posts.soft_delete(post.id).await.unwrap();
        assert!(
            posts
                .react(post.id, Uuid::new_v4(), Reaction::Like)
                .await
                .unwrap()
                .is_none()
        );
    }
}
