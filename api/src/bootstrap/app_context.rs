use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::access_tokens::AccessTokenPort;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::store_health::StoreHealth;
use crate::application::ports::ticket_repository::TicketRepository;
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::{Config, StoreBackend};
use crate::infrastructure::crypto::JwtAccessTokens;
use crate::infrastructure::db::repositories::comment_repository_sqlx::SqlxCommentRepository;
use crate::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository;
use crate::infrastructure::db::repositories::ticket_repository_sqlx::SqlxTicketRepository;
use crate::infrastructure::db::repositories::train_repository_sqlx::SqlxTrainRepository;
use crate::infrastructure::db::repositories::trainstation_repository_sqlx::SqlxTrainstationRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::db::{self, PgPool, SqlxStoreHealth};
use crate::infrastructure::memory::{
    MemoryCommentRepository, MemoryPostRepository, MemoryStoreHealth, MemoryTicketRepository,
    MemoryTrainRepository, MemoryTrainstationRepository, MemoryUserRepository,
};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    trainstation_repo: Arc<dyn TrainstationRepository>,
    train_repo: Arc<dyn TrainRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    access_tokens: Arc<dyn AccessTokenPort>,
    store_health: Arc<dyn StoreHealth>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        trainstation_repo: Arc<dyn TrainstationRepository>,
        train_repo: Arc<dyn TrainRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        access_tokens: Arc<dyn AccessTokenPort>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            user_repo,
            trainstation_repo,
            train_repo,
            ticket_repo,
            post_repo,
            comment_repo,
            access_tokens,
            store_health,
        }
    }

    /// Everything kept in process memory.
    pub fn in_memory(cfg: &Config) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::default()),
            Arc::new(MemoryTrainstationRepository::default()),
            Arc::new(MemoryTrainRepository::default()),
            Arc::new(MemoryTicketRepository::default()),
            Arc::new(MemoryPostRepository::default()),
            Arc::new(MemoryCommentRepository::default()),
            Arc::new(JwtAccessTokens::new(&cfg.jwt_secret, cfg.jwt_expires_secs)),
            Arc::new(MemoryStoreHealth),
        )
    }

    pub fn postgres(cfg: &Config, pool: PgPool) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxTrainstationRepository::new(pool.clone())),
            Arc::new(SqlxTrainRepository::new(pool.clone())),
            Arc::new(SqlxTicketRepository::new(pool.clone())),
            Arc::new(SqlxPostRepository::new(pool.clone())),
            Arc::new(SqlxCommentRepository::new(pool.clone())),
            Arc::new(JwtAccessTokens::new(&cfg.jwt_secret, cfg.jwt_expires_secs)),
            Arc::new(SqlxStoreHealth { pool }),
        )
    }

    /// Connects (and migrates) the backend named by the config.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        match cfg.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Ok(Self::in_memory(cfg))
            }
            StoreBackend::Postgres => {
                let pool = db::connect_pool(
                    &cfg.database_url,
                    cfg.db_max_connections,
                    Duration::from_secs(cfg.db_acquire_timeout_secs),
                )
                .await?;
                db::migrate(&pool).await?;
                tracing::info!(max_connections = cfg.db_max_connections, "postgres_ready");
                Ok(Self::postgres(cfg, pool))
            }
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn trainstation_repo(&self) -> Arc<dyn TrainstationRepository> {
        self.services.trainstation_repo.clone()
    }

    pub fn train_repo(&self) -> Arc<dyn TrainRepository> {
        self.services.train_repo.clone()
    }

    pub fn ticket_repo(&self) -> Arc<dyn TicketRepository> {
        self.services.ticket_repo.clone()
    }

    pub fn post_repo(&self) -> Arc<dyn PostRepository> {
        self.services.post_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn access_tokens(&self) -> Arc<dyn AccessTokenPort> {
        self.services.access_tokens.clone()
    }

    pub fn store_health(&self) -> Arc<dyn StoreHealth> {
        self.services.store_health.clone()
    }
}
