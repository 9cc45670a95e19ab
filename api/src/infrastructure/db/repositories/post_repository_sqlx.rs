use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::application::ports::post_repository::PostRepository;
use crate::domain::listing::ListQuery;
use crate::domain::posts::post::{NewPost, Post, PostPatch, PostSort, Reaction};
use crate::infrastructure::db::{PgPool, order_by, scope_filter};

const COLUMNS: &str = "id, title, content, author_id, likes, dislikes, liked_by, disliked_by, tags, created_at, updated_at, deleted_at";

// Both toggles lock the row, rebuild the two sets, and derive the counters
// from the rebuilt sets in the same statement. $2 is the reacting user.
const LIKE_SQL: &str = r#"
WITH target AS (
    SELECT id,
           CASE WHEN $2 = ANY(liked_by) THEN array_remove(liked_by, $2)
                ELSE array_append(liked_by, $2) END AS next_liked,
           array_remove(disliked_by, $2) AS next_disliked
    FROM posts
    WHERE id = $1 AND deleted_at IS NULL
    FOR UPDATE
)
UPDATE posts p SET
    liked_by = t.next_liked,
    disliked_by = t.next_disliked,
    likes = cardinality(t.next_liked),
    dislikes = cardinality(t.next_disliked),
    updated_at = now()
FROM target t
WHERE p.id = t.id
RETURNING p.id, p.title, p.content, p.author_id, p.likes, p.dislikes, p.liked_by,
          p.disliked_by, p.tags, p.created_at, p.updated_at, p.deleted_at"#;

const DISLIKE_SQL: &str = r#"
WITH target AS (
    SELECT id,
           array_remove(liked_by, $2) AS next_liked,
           CASE WHEN $2 = ANY(disliked_by) THEN array_remove(disliked_by, $2)
                ELSE array_append(disliked_by, $2) END AS next_disliked
    FROM posts
    WHERE id = $1 AND deleted_at IS NULL
    FOR UPDATE
)
UPDATE posts p SET
    liked_by = t.next_liked,
    disliked_by = t.next_disliked,
    likes = cardinality(t.next_liked),
    dislikes = cardinality(t.next_disliked),
    updated_at = now()
FROM target t
WHERE p.id = t.id
RETURNING p.id, p.title, p.content, p.author_id, p.likes, p.dislikes, p.liked_by,
          p.disliked_by, p.tags, p.created_at, p.updated_at, p.deleted_at"#;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_post(r: PgRow) -> Post {
    Post {
        id: r.get("id"),
        title: r.get("title"),
        content: r.get("content"),
        author_id: r.get("author_id"),
        likes: r.get("likes"),
        dislikes: r.get("dislikes"),
        liked_by: r.get("liked_by"),
        disliked_by: r.get("disliked_by"),
        tags: r.get("tags"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        deleted_at: r.get("deleted_at"),
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &NewPost) -> anyhow::Result<Post> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO posts (title, content, author_id, tags)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .bind(&post.tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_post(row))
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM posts WHERE id = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_post))
    }

    async fn list(&self, query: &ListQuery<PostSort>) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM posts WHERE {} ORDER BY {} LIMIT $1",
            scope_filter(RecordScope::Active),
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_post).collect())
    }

    async fn update(&self, id: Uuid, patch: &PostPatch) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(&format!(
            r#"UPDATE posts SET
                 title = COALESCE($2, title),
                 content = COALESCE($3, content),
                 tags = COALESCE($4, tags),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.content.as_deref())
        .bind(patch.tags.as_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_post))
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE posts SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn react(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> anyhow::Result<Option<Post>> {
        let sql = match reaction {
            Reaction::Like => LIKE_SQL,
            Reaction::Dislike => DISLIKE_SQL,
        };
        let row = sqlx::query(sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_post))
    }
}
