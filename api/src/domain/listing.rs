//! Sorting and paging parameters shared by every `list` operation.
//!
//! A sort spec is a comma separated list of field names, each optionally
//! prefixed with `-` for descending order (`-name,open_hour`). Every entity
//! declares its own allow-list through [`SortField`]; names outside the list
//! are dropped without error.

use std::cmp::Ordering;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Allow-listed sortable attribute of an entity.
pub trait SortField: Sized + Copy + PartialEq {
    fn parse(name: &str) -> Option<Self>;
    fn column(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub sort: Vec<SortKey<F>>,
    pub limit: i64,
}

impl<F> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl<F: SortField> ListQuery<F> {
    pub fn parse(sort: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            sort: sort.map(parse_sort).unwrap_or_default(),
            limit: parse_limit(limit),
        }
    }
}

fn parse_sort<F: SortField>(raw: &str) -> Vec<SortKey<F>> {
    let mut keys: Vec<SortKey<F>> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let (direction, name) = match part.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, part),
        };
        let Some(field) = F::parse(name) else {
            continue;
        };
        if keys.iter().any(|k| k.field == field) {
            continue;
        }
        keys.push(SortKey { field, direction });
    }
    keys
}

// Non-positive or unparsable limits fall back to the default.
fn parse_limit(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n > 0 => n.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        OpenHour,
    }

    impl SortField for Field {
        fn parse(name: &str) -> Option<Self> {
            match name {
                "name" => Some(Field::Name),
                "open_hour" => Some(Field::OpenHour),
                _ => None,
            }
        }

        fn column(&self) -> &'static str {
            match self {
                Field::Name => "name",
                Field::OpenHour => "open_hour",
            }
        }
    }

    #[test]
    fn parses_directions_and_ignores_unknown_fields() {
        let q = ListQuery::<Field>::parse(Some("-name,password,open_hour"), None);
        assert_eq!(
            q.sort,
            vec![
                SortKey {
                    field: Field::Name,
                    direction: SortDirection::Desc
                },
                SortKey {
                    field: Field::OpenHour,
                    direction: SortDirection::Asc
                },
            ]
        );
        assert_eq!(q.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn repeated_field_keeps_first_occurrence() {
        let q = ListQuery::<Field>::parse(Some("name,-name"), None);
        assert_eq!(q.sort.len(), 1);
        assert_eq!(q.sort[0].direction, SortDirection::Asc);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(ListQuery::<Field>::parse(None, Some("3")).limit, 3);
        assert_eq!(ListQuery::<Field>::parse(None, Some("0")).limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::<Field>::parse(None, Some("-4")).limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::<Field>::parse(None, Some("ten")).limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::<Field>::parse(None, Some("5000")).limit, MAX_LIMIT);
    }

    #[test]
    fn empty_sort_spec_yields_no_keys() {
        let q = ListQuery::<Field>::parse(Some(""), Some("7"));
        assert!(q.sort.is_empty());
        assert_eq!(q.limit, 7);
    }
}
