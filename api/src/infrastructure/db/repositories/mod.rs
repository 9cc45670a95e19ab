pub mod comment_repository_sqlx;
pub mod post_repository_sqlx;
pub mod ticket_repository_sqlx;
pub mod train_repository_sqlx;
pub mod trainstation_repository_sqlx;
pub mod user_repository_sqlx;
