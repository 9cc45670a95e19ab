use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub likes: i64,
    pub dislikes: i64,
    pub liked_by: Vec<Uuid>,
    pub disliked_by: Vec<Uuid>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

/// Where one user stands on one post. Exactly one state holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionState {
    Neutral,
    Liked,
    Disliked,
}

impl ReactionState {
    /// Repeating the current reaction cancels it; the opposite one replaces it.
    pub fn toggled(self, reaction: Reaction) -> ReactionState {
        match (self, reaction) {
            (ReactionState::Liked, Reaction::Like) => ReactionState::Neutral,
            (ReactionState::Disliked, Reaction::Dislike) => ReactionState::Neutral,
            (_, Reaction::Like) => ReactionState::Liked,
            (_, Reaction::Dislike) => ReactionState::Disliked,
        }
    }
}

impl Post {
    pub fn reaction_of(&self, user_id: Uuid) -> ReactionState {
        if self.liked_by.contains(&user_id) {
            ReactionState::Liked
        } else if self.disliked_by.contains(&user_id) {
            ReactionState::Disliked
        } else {
            ReactionState::Neutral
        }
    }

    /// Applies one like/dislike toggle and returns the user's new state.
    /// Callers must hold the record exclusively for the whole call.
    pub fn react(&mut self, user_id: Uuid, reaction: Reaction) -> ReactionState {
        let current = self.reaction_of(user_id);
        let next = current.toggled(reaction);

        match current {
            ReactionState::Liked => {
                self.liked_by.retain(|u| *u != user_id);
                self.likes -= 1;
            }
            ReactionState::Disliked => {
                self.disliked_by.retain(|u| *u != user_id);
                self.dislikes -= 1;
            }
            ReactionState::Neutral => {}
        }
        match next {
            ReactionState::Liked => {
                self.liked_by.push(user_id);
                self.likes += 1;
            }
            ReactionState::Disliked => {
                self.disliked_by.push(user_id);
                self.dislikes += 1;
            }
            ReactionState::Neutral => {}
        }
        next
    }

    /// Counters match their sets and no user sits in both.
    pub fn reactions_consistent(&self) -> bool {
        self.likes == self.liked_by.len() as i64
            && self.dislikes == self.disliked_by.len() as i64
            && !self.liked_by.iter().any(|u| self.disliked_by.contains(u))
    }
}

impl SoftDeletable for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Title,
    Likes,
    Dislikes,
    CreatedAt,
}

impl SortField for PostSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(PostSort::Title),
            "likes" => Some(PostSort::Likes),
            "dislikes" => Some(PostSort::Dislikes),
            "created_at" => Some(PostSort::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            PostSort::Title => "title",
            PostSort::Likes => "likes",
            PostSort::Dislikes => "dislikes",
            PostSort::CreatedAt => "created_at",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_post() -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: "t".into(),
            content: "c".into(),
            author_id: Uuid::new_v4(),
            likes: 0,
            dislikes: 0,
            liked_by: vec![],
            disliked_by: vec![],
            tags: vec![],
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn like_twice_returns_to_neutral() {
        let mut post = blank_post();
        let u = Uuid::new_v4();
        assert_eq!(post.react(u, Reaction::Like), ReactionState::Liked);
        assert_eq!(post.likes, 1);
        assert_eq!(post.react(u, Reaction::Like), ReactionState::Neutral);
        assert_eq!(post.likes, 0);
        assert!(post.liked_by.is_empty());
    }

    #[test]
    fn dislike_moves_user_out_of_likes() {
        let mut post = blank_post();
        let u = Uuid::new_v4();
        post.react(u, Reaction::Like);
        assert_eq!(post.react(u, Reaction::Dislike), ReactionState::Disliked);
        assert_eq!((post.likes, post.dislikes), (0, 1));
        assert_eq!(post.disliked_by, vec![u]);
        assert_eq!(post.react(u, Reaction::Like), ReactionState::Liked);
        assert_eq!((post.likes, post.dislikes), (1, 0));
    }

    #[test]
    fn invariant_holds_over_long_toggle_sequences() {
        let mut post = blank_post();
        let users: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        // Deterministic LCG so the sequence is reproducible.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..500 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let user = users[(seed >> 33) as usize % users.len()];
            let reaction = if (seed >> 17) & 1 == 0 {
                Reaction::Like
            } else {
                Reaction::Dislike
            };
            post.react(user, reaction);
            assert!(post.reactions_consistent());
            assert!(post.likes >= 0 && post.dislikes >= 0);
        }
    }

    #[test]
    fn transition_table() {
        use ReactionState::*;
        assert_eq!(Neutral.toggled(Reaction::Like), Liked);
        assert_eq!(Liked.toggled(Reaction::Like), Neutral);
        assert_eq!(Disliked.toggled(Reaction::Like), Liked);
        assert_eq!(Neutral.toggled(Reaction::Dislike), Disliked);
        assert_eq!(Disliked.toggled(Reaction::Dislike), Neutral);
        assert_eq!(Liked.toggled(Reaction::Dislike), Disliked);
    }
}
