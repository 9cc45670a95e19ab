use crate::domain::lifecycle::SoftDeletable;

/// Which records a read may see. Every repository read takes one, so the
/// soft-delete filter lives in the adapters' single scope helper instead of
/// being repeated per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordScope {
    /// Records whose `deleted_at` is null.
    #[default]
    Active,
    IncludeDeleted,
}

impl RecordScope {
    pub fn admits<T: SoftDeletable + ?Sized>(self, record: &T) -> bool {
        match self {
            RecordScope::Active => !record.is_deleted(),
            RecordScope::IncludeDeleted => true,
        }
    }
}
