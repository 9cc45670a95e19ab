pub mod access_tokens;
pub mod comment_repository;
pub mod post_repository;
pub mod record_scope;
pub mod store_health;
pub mod ticket_repository;
pub mod train_repository;
pub mod trainstation_repository;
pub mod user_repository;

pub use record_scope::RecordScope;

/// Raised by a store when a write would break a uniqueness constraint.
#[derive(Debug, thiserror::Error)]
#[error("a record with this {0} already exists")]
pub struct DuplicateKey(pub String);
