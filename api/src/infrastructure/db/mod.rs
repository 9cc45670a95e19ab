use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::application::ports::RecordScope;
use crate::application::ports::store_health::StoreHealth;
use crate::domain::listing::{ListQuery, SortField};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// The one place a [`RecordScope`] becomes SQL.
pub(crate) fn scope_filter(scope: RecordScope) -> &'static str {
    match scope {
        RecordScope::Active => "deleted_at IS NULL",
        RecordScope::IncludeDeleted => "TRUE",
    }
}

/// `ORDER BY` body for a list query. Columns come from the entity's sort
/// allow-list, never from the request text.
pub(crate) fn order_by<F: SortField>(query: &ListQuery<F>) -> String {
    if query.sort.is_empty() {
        return "created_at DESC, id".to_string();
    }
    let mut parts: Vec<String> = query
        .sort
        .iter()
        .map(|k| format!("{} {}", k.field.column(), k.direction.as_sql()))
        .collect();
    parts.push("id".to_string());
    parts.join(", ")
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Name of the column behind a unique violation, taken from the index name
/// (`users_email_key` -> `email`).
pub(crate) fn violated_key(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(db) = err else {
        return None;
    };
    let constraint = db.constraint()?;
    let trimmed = constraint.strip_suffix("_key").unwrap_or(constraint);
    Some(
        trimmed
            .rsplit_once('_')
            .map(|(_, col)| col)
            .unwrap_or(trimmed)
            .to_string(),
    )
}

pub struct SqlxStoreHealth {
    pub pool: PgPool,
}

#[async_trait]
impl StoreHealth for SqlxStoreHealth {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

pub mod repositories;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{SortDirection, SortKey};
    use crate::domain::trains::train::TrainSort;

    #[test]
    fn default_order_is_newest_first() {
        let q: ListQuery<TrainSort> = ListQuery::default();
        assert_eq!(order_by(&q), "created_at DESC, id");
    }

    #[test]
    fn order_uses_allow_listed_columns() {
        let q = ListQuery {
            sort: vec![
                SortKey {
                    field: TrainSort::DepartureTime,
                    direction: SortDirection::Desc,
                },
                SortKey {
                    field: TrainSort::Name,
                    direction: SortDirection::Asc,
                },
            ],
            limit: 10,
        };
        assert_eq!(order_by(&q), "departure_time DESC, name ASC, id");
    }

    #[test]
    fn role_orders_by_privilege() {
        use crate::domain::users::user::UserSort;
        let q = ListQuery {
            sort: vec![SortKey {
                field: UserSort::Role,
                direction: SortDirection::Desc,
            }],
            limit: 10,
        };
        assert_eq!(
            order_by(&q),
            "CASE role WHEN 'user' THEN 0 WHEN 'employee' THEN 1 ELSE 2 END DESC, id"
        );
    }

    #[test]
    fn scope_renders_filter() {
        assert_eq!(scope_filter(RecordScope::Active), "deleted_at IS NULL");
        assert_eq!(scope_filter(RecordScope::IncludeDeleted), "TRUE");
    }
}
