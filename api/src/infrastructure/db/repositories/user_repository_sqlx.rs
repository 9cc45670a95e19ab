use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::{DuplicateKey, RecordScope};
use crate::domain::listing::ListQuery;
use crate::domain::users::user::{NewUser, Role, User, UserPatch, UserSort};
use crate::infrastructure::db::{PgPool, is_unique_violation, order_by, scope_filter, violated_key};

const COLUMNS: &str = "id, pseudo, email, password_hash, role, created_at, updated_at, deleted_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: PgRow) -> anyhow::Result<User> {
    let role: String = r.get("role");
    Ok(User {
        id: r.get("id"),
        pseudo: r.get("pseudo"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        role: role.parse::<Role>()?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        deleted_at: r.get("deleted_at"),
    })
}

fn map_write_error(err: sqlx::Error) -> anyhow::Error {
    if is_unique_violation(&err) {
        let key = violated_key(&err).unwrap_or_else(|| "pseudo or email".to_string());
        return DuplicateKey(key).into();
    }
    err.into()
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO users (pseudo, email, password_hash) VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(&user.pseudo)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        map_user(row)
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
        scope: RecordScope,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE email = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_user).transpose()
    }

    async fn list(&self, query: &ListQuery<UserSort>) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE {} ORDER BY {} LIMIT $1",
            scope_filter(RecordScope::Active),
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(map_user).collect()
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"UPDATE users SET
                 pseudo = COALESCE($2, pseudo),
                 email = COALESCE($3, email),
                 password_hash = COALESCE($4, password_hash),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.pseudo.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;
        row.map(map_user).transpose()
    }

    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"UPDATE users SET role = $2, updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(map_user).transpose()
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE users SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
