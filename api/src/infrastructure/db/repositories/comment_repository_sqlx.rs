use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::comments::comment::{Comment, CommentPatch, CommentSort, NewComment};
use crate::domain::listing::ListQuery;
use crate::infrastructure::db::{PgPool, order_by, scope_filter};

const COLUMNS: &str = "id, content, author_id, post_id, created_at, updated_at, deleted_at";

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_comment(r: PgRow) -> Comment {
    Comment {
        id: r.get("id"),
        content: r.get("content"),
        author_id: r.get("author_id"),
        post_id: r.get("post_id"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        deleted_at: r.get("deleted_at"),
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Comment> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO comments (content, author_id, post_id)
               VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(&comment.content)
        .bind(comment.author_id)
        .bind(comment.post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_comment(row))
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM comments WHERE id = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_comment))
    }

    async fn list(&self, query: &ListQuery<CommentSort>) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM comments WHERE {} ORDER BY {} LIMIT $1",
            scope_filter(RecordScope::Active),
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_comment).collect())
    }

    async fn list_for_post(
        &self,
        post_id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM comments WHERE post_id = $1 AND {} ORDER BY created_at ASC, id",
            scope_filter(scope)
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_comment).collect())
    }

    async fn update(&self, id: Uuid, patch: &CommentPatch) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(&format!(
            r#"UPDATE comments SET
                 content = COALESCE($2, content),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.content.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_comment))
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE comments SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
