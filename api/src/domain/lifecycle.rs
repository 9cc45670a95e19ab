use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Records that are never erased: deletion stamps `deleted_at` instead.
pub trait SoftDeletable {
    fn id(&self) -> Uuid;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}
