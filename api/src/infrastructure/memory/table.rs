use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{DuplicateKey, RecordScope};
use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::{ListQuery, SortField};

/// Per-entity comparison for the memory backend's `ORDER BY`.
pub trait SortableBy<F: SortField> {
    fn created_at(&self) -> DateTime<Utc>;
    fn compare_by(&self, other: &Self, field: F) -> Ordering;
}

/// One entity's rows behind a single lock. Every read goes through a
/// [`RecordScope`], and every read-modify-write runs under the write guard.
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: SoftDeletable + Clone> MemoryTable<T> {
    pub async fn insert(&self, row: T) -> T {
        self.rows.write().await.push(row.clone());
        row
    }

    /// Inserts unless `conflict(existing, &row)` names a clashing key.
    pub async fn insert_unique<C>(&self, row: T, conflict: C) -> anyhow::Result<T>
    where
        C: Fn(&T, &T) -> Option<&'static str>,
    {
        let mut rows = self.rows.write().await;
        if let Some(key) = rows.iter().find_map(|r| conflict(r, &row)) {
            return Err(DuplicateKey(key.to_string()).into());
        }
        rows.push(row.clone());
        Ok(row)
    }

    pub async fn find(&self, id: Uuid, scope: RecordScope) -> Option<T> {
        self.rows
            .read()
            .await
            .iter()
            .find(|r| r.id() == id && scope.admits(*r))
            .cloned()
    }

    pub async fn select<P>(&self, scope: RecordScope, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|r| scope.admits(*r) && pred(r))
            .cloned()
            .collect()
    }

    /// Applies `f` to the matching row in place and returns the result.
    pub async fn update<M>(&self, id: Uuid, scope: RecordScope, f: M) -> Option<T>
    where
        M: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id && scope.admits(&**r))?;
        f(row);
        Some(row.clone())
    }

    /// Like [`update`](Self::update), but the modified row is checked against
    /// every other row before it is written back.
    pub async fn update_unique<M, C>(
        &self,
        id: Uuid,
        scope: RecordScope,
        f: M,
        conflict: C,
    ) -> anyhow::Result<Option<T>>
    where
        M: FnOnce(&mut T),
        C: Fn(&T, &T) -> Option<&'static str>,
    {
        let mut rows = self.rows.write().await;
        let Some(pos) = rows.iter().position(|r| r.id() == id && scope.admits(r)) else {
            return Ok(None);
        };
        let mut candidate = rows[pos].clone();
        f(&mut candidate);
        let clash = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .find_map(|(_, r)| conflict(r, &candidate));
        if let Some(key) = clash {
            return Err(DuplicateKey(key.to_string()).into());
        }
        rows[pos] = candidate.clone();
        Ok(Some(candidate))
    }
}

/// Sorts `rows` by the query's keys (newest first when none) and truncates to
/// the query's limit.
pub fn sorted_page<T, F>(mut rows: Vec<T>, query: &ListQuery<F>) -> Vec<T>
where
    T: SortableBy<F>,
    F: SortField,
{
    // Storage order is oldest first; reversing keeps ties newest first.
    rows.reverse();
    if query.sort.is_empty() {
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    } else {
        rows.sort_by(|a, b| {
            query.sort.iter().fold(Ordering::Equal, |acc, key| {
                acc.then_with(|| key.direction.apply(a.compare_by(b, key.field)))
            })
        });
    }
    rows.truncate(usize::try_from(query.limit).unwrap_or(0));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{SortDirection, SortKey};

    #[derive(Debug, Clone)]
    struct Row {
        id: Uuid,
        name: &'static str,
        created_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl SoftDeletable for Row {
        fn id(&self) -> Uuid {
            self.id
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ByName;

    impl SortField for ByName {
        fn parse(name: &str) -> Option<Self> {
            (name == "name").then_some(ByName)
        }

        fn column(&self) -> &'static str {
            "name"
        }
    }

    impl SortableBy<ByName> for Row {
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn compare_by(&self, other: &Self, _field: ByName) -> Ordering {
            self.name.cmp(other.name)
        }
    }

    fn row(name: &'static str, offset_secs: i64) -> Row {
        Row {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now() + chrono::Duration::seconds(offset_secs),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn scope_hides_deleted_rows() {
        let table = MemoryTable::default();
        let r = table.insert(row("a", 0)).await;
        table
            .update(r.id, RecordScope::Active, |r| r.deleted_at = Some(Utc::now()))
            .await
            .unwrap();
        assert!(table.find(r.id, RecordScope::Active).await.is_none());
        assert!(table.find(r.id, RecordScope::IncludeDeleted).await.is_some());
        assert!(table.update(r.id, RecordScope::Active, |_| {}).await.is_none());
    }

    #[tokio::test]
    async fn unique_update_rejects_clash_and_keeps_row() {
        let table = MemoryTable::default();
        let same_name = |a: &Row, b: &Row| (a.name == b.name).then_some("name");
        table.insert_unique(row("a", 0), same_name).await.unwrap();
        let b = table.insert_unique(row("b", 1), same_name).await.unwrap();
        assert!(table.insert_unique(row("a", 2), same_name).await.is_err());

        let err = table
            .update_unique(b.id, RecordScope::Active, |r| r.name = "a", same_name)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<DuplicateKey>().is_some());
        assert_eq!(table.find(b.id, RecordScope::Active).await.unwrap().name, "b");
    }

    #[test]
    fn page_sorts_and_truncates() {
        let rows = vec![row("b", 0), row("c", 1), row("a", 2)];
        let newest: Vec<_> = sorted_page(rows.clone(), &ListQuery::<ByName>::default())
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(newest, vec!["a", "c", "b"]);

        let query = ListQuery {
            sort: vec![SortKey {
                field: ByName,
                direction: SortDirection::Desc,
            }],
            limit: 2,
        };
        let names: Vec<_> = sorted_page(rows, &query).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "b"]);
    }
}
