use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::MatchedPath;
use axum::middleware::from_fn_with_state;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use railroad_api::bootstrap::app_context::{AppContext, AppServices};
use railroad_api::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            railroad_api::presentation::http::health::health,
            railroad_api::presentation::http::users::register,
            railroad_api::presentation::http::users::login,
            railroad_api::presentation::http::users::me,
            railroad_api::presentation::http::users::list_users,
            railroad_api::presentation::http::users::get_user,
            railroad_api::presentation::http::users::update_self,
            railroad_api::presentation::http::users::update_user,
            railroad_api::presentation::http::users::delete_self,
            railroad_api::presentation::http::users::delete_user,
            railroad_api::presentation::http::users::set_admin,
            railroad_api::presentation::http::users::set_employee,
            railroad_api::presentation::http::users::set_user,
            railroad_api::presentation::http::trainstations::create_trainstation,
            railroad_api::presentation::http::trainstations::list_trainstations,
            railroad_api::presentation::http::trainstations::get_trainstation,
            railroad_api::presentation::http::trainstations::update_trainstation,
            railroad_api::presentation::http::trainstations::delete_trainstation,
            railroad_api::presentation::http::trains::create_train,
            railroad_api::presentation::http::trains::list_trains,
            railroad_api::presentation::http::trains::get_train,
            railroad_api::presentation::http::trains::update_train,
            railroad_api::presentation::http::trains::delete_train,
            railroad_api::presentation::http::trains::activate_train,
            railroad_api::presentation::http::trains::deactivate_train,
            railroad_api::presentation::http::tickets::book_ticket,
            railroad_api::presentation::http::tickets::list_tickets,
            railroad_api::presentation::http::tickets::get_ticket,
            railroad_api::presentation::http::tickets::validate_ticket,
            railroad_api::presentation::http::posts::create_post,
            railroad_api::presentation::http::posts::list_posts,
            railroad_api::presentation::http::posts::get_post,
            railroad_api::presentation::http::posts::update_post,
            railroad_api::presentation::http::posts::delete_post,
            railroad_api::presentation::http::posts::like_post,
            railroad_api::presentation::http::posts::dislike_post,
            railroad_api::presentation::http::posts::comment_post,
            railroad_api::presentation::http::posts::list_post_comments,
            railroad_api::presentation::http::comments::list_comments,
            railroad_api::presentation::http::comments::get_comment,
            railroad_api::presentation::http::comments::update_comment,
            railroad_api::presentation::http::comments::delete_comment,
        ),
        components(schemas(
            railroad_api::domain::users::user::Role,
            railroad_api::domain::posts::post::Reaction,
            railroad_api::presentation::http::response::Ack,
            railroad_api::presentation::http::response::ErrorBody,
            railroad_api::presentation::http::health::HealthResp,
            railroad_api::presentation::http::users::UserView,
            railroad_api::presentation::http::users::UserResponse,
            railroad_api::presentation::http::users::UserListResponse,
            railroad_api::presentation::http::users::RegisterRequest,
            railroad_api::presentation::http::users::LoginRequest,
            railroad_api::presentation::http::users::LoginResponse,
            railroad_api::presentation::http::users::UpdateUserRequest,
            railroad_api::presentation::http::trainstations::TrainstationView,
            railroad_api::presentation::http::trainstations::TrainstationResponse,
            railroad_api::presentation::http::trainstations::TrainstationListResponse,
            railroad_api::presentation::http::trainstations::TrainstationDeletedResponse,
            railroad_api::presentation::http::trainstations::TrainstationMultipart,
            railroad_api::presentation::http::trains::TrainView,
            railroad_api::presentation::http::trains::TrainResponse,
            railroad_api::presentation::http::trains::TrainListResponse,
            railroad_api::presentation::http::trains::CreateTrainRequest,
            railroad_api::presentation::http::trains::UpdateTrainRequest,
            railroad_api::presentation::http::tickets::TicketView,
            railroad_api::presentation::http::tickets::TicketResponse,
            railroad_api::presentation::http::tickets::TicketListResponse,
            railroad_api::presentation::http::tickets::BookTicketRequest,
            railroad_api::presentation::http::posts::PostView,
            railroad_api::presentation::http::posts::PostResponse,
            railroad_api::presentation::http::posts::PostListResponse,
            railroad_api::presentation::http::posts::PostDeletedResponse,
            railroad_api::presentation::http::posts::CreatePostRequest,
            railroad_api::presentation::http::posts::UpdatePostRequest,
            railroad_api::presentation::http::posts::CommentRequest,
            railroad_api::presentation::http::comments::CommentView,
            railroad_api::presentation::http::comments::CommentResponse,
            railroad_api::presentation::http::comments::CommentListResponse,
            railroad_api::presentation::http::comments::UpdateCommentRequest,
        )),
        tags(
            (name = "Users", description = "Accounts, authentication and roles"),
            (name = "Trainstations", description = "Stations and their images"),
            (name = "Trains", description = "Train schedule"),
            (name = "Tickets", description = "Ticket booking and validation"),
            (name = "Posts", description = "Posts, reactions and post comments"),
            (name = "Comments", description = "Comment management"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        Some(Err(_)) | None if cfg.is_production => {
            // FRONTEND_URL is unusable: deny every cross origin request
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        // Development convenience
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "ctrl_c_listener_failed");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "railroad_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        backend = ?cfg.store_backend,
        production = cfg.is_production,
        "Starting railroad backend"
    );

    let services = AppServices::from_config(&cfg).await?;
    let ctx = AppContext::new(cfg.clone(), services);

    let app = railroad_api::presentation::http::router(ctx)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(from_fn_with_state(
            Duration::from_secs(cfg.request_timeout_secs),
            railroad_api::presentation::http::deadline::enforce_deadline,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
