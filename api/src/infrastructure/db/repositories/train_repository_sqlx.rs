use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::application::ports::train_repository::TrainRepository;
use crate::domain::listing::ListQuery;
use crate::domain::trains::train::{NewTrain, Train, TrainPatch, TrainSort};
use crate::infrastructure::db::{PgPool, order_by, scope_filter};

const COLUMNS: &str = "id, name, start_station, end_station, departure_time, active, created_at, updated_at, deleted_at";

pub struct SqlxTrainRepository {
    pub pool: PgPool,
}

impl SqlxTrainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_train(r: PgRow) -> Train {
    Train {
        id: r.get("id"),
        name: r.get("name"),
        start_station: r.get("start_station"),
        end_station: r.get("end_station"),
        departure_time: r.get("departure_time"),
        active: r.get("active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        deleted_at: r.get("deleted_at"),
    }
}

#[async_trait]
impl TrainRepository for SqlxTrainRepository {
    async fn create(&self, train: &NewTrain) -> anyhow::Result<Train> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO trains (name, start_station, end_station, departure_time)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        ))
        .bind(&train.name)
        .bind(train.start_station)
        .bind(train.end_station)
        .bind(train.departure_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_train(row))
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Train>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM trains WHERE id = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_train))
    }

    async fn list(&self, query: &ListQuery<TrainSort>) -> anyhow::Result<Vec<Train>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM trains WHERE {} ORDER BY {} LIMIT $1",
            scope_filter(RecordScope::Active),
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_train).collect())
    }

    async fn update(&self, id: Uuid, patch: &TrainPatch) -> anyhow::Result<Option<Train>> {
        let row = sqlx::query(&format!(
            r#"UPDATE trains SET
                 name = COALESCE($2, name),
                 start_station = COALESCE($3, start_station),
                 end_station = COALESCE($4, end_station),
                 departure_time = COALESCE($5, departure_time),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.start_station)
        .bind(patch.end_station)
        .bind(patch.departure_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_train))
    }

    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        scope: RecordScope,
    ) -> anyhow::Result<Option<Train>> {
        let row = sqlx::query(&format!(
            r#"UPDATE trains SET active = $2, updated_at = now()
               WHERE id = $1 AND {}
               RETURNING {COLUMNS}"#,
            scope_filter(scope)
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_train))
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE trains SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn ids_serving_station(
        &self,
        station_id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Vec<Uuid>> {
        let rows = sqlx::query(&format!(
            "SELECT id FROM trains WHERE (start_station = $1 OR end_station = $1) AND {}",
            scope_filter(scope)
        ))
        .bind(station_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.get("id")).collect())
    }
}
