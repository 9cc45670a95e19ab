use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::domain::listing::ListQuery;
use crate::domain::trainstations::trainstation::{
    NewTrainstation, Trainstation, TrainstationPatch, TrainstationSort,
};
use crate::infrastructure::db::{PgPool, order_by, scope_filter};

const COLUMNS: &str = "id, name, open_hour, close_hour, image, created_at, updated_at, deleted_at";

pub struct SqlxTrainstationRepository {
    pub pool: PgPool,
}

impl SqlxTrainstationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_station(r: PgRow) -> Trainstation {
    Trainstation {
        id: r.get("id"),
        name: r.get("name"),
        open_hour: r.get("open_hour"),
        close_hour: r.get("close_hour"),
        image: r.get("image"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        deleted_at: r.get("deleted_at"),
    }
}

#[async_trait]
impl TrainstationRepository for SqlxTrainstationRepository {
    async fn create(&self, station: &NewTrainstation) -> anyhow::Result<Trainstation> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO trainstations (name, open_hour, close_hour, image)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        ))
        .bind(&station.name)
        .bind(&station.open_hour)
        .bind(&station.close_hour)
        .bind(&station.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_station(row))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Option<Trainstation>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM trainstations WHERE id = $1 AND {}",
            scope_filter(scope)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_station))
    }

    async fn list(&self, query: &ListQuery<TrainstationSort>) -> anyhow::Result<Vec<Trainstation>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM trainstations WHERE {} ORDER BY {} LIMIT $1",
            scope_filter(RecordScope::Active),
            order_by(query)
        ))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_station).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &TrainstationPatch,
    ) -> anyhow::Result<Option<Trainstation>> {
        let row = sqlx::query(&format!(
            r#"UPDATE trainstations SET
                 name = COALESCE($2, name),
                 open_hour = COALESCE($3, open_hour),
                 close_hour = COALESCE($4, close_hour),
                 image = COALESCE($5, image),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.open_hour.as_deref())
        .bind(patch.close_hour.as_deref())
        .bind(patch.image.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_station))
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE trainstations SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
