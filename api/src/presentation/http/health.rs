use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub backend: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResp), (status = 503, body = HealthResp))
)]
pub async fn health(State(ctx): State<AppContext>) -> (StatusCode, Json<HealthResp>) {
    let store = ctx.store_health();
    let (code, status) = if store.ping().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(HealthResp {
            status,
            backend: store.backend(),
        }),
    )
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(ctx)
}
