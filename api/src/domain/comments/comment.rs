use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDeletable for Comment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub content: Option<String>,
}

impl CommentPatch {
    pub fn apply_to(&self, comment: &mut Comment) {
        if let Some(content) = &self.content {
            comment.content = content.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    CreatedAt,
}

impl SortField for CommentSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(CommentSort::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        "created_at"
    }
}
