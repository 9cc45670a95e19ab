use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod comments;
pub mod deadline;
pub mod health;
pub mod posts;
pub mod response;
pub mod tickets;
pub mod trains;
pub mod trainstations;
pub mod users;

/// Every resource router under its collection prefix. Cross-cutting layers
/// are added by the binary.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(health::routes(ctx.clone()))
        .nest("/users", users::routes(ctx.clone()))
        .nest("/trainstations", trainstations::routes(ctx.clone()))
        .nest("/trains", trains::routes(ctx.clone()))
        .nest("/tickets", tickets::routes(ctx.clone()))
        .nest("/posts", posts::routes(ctx.clone()))
        .nest("/comments", comments::routes(ctx))
}
