use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid regex"));

/// Normalizes an `H:MM`/`HH:MM` opening hour to zero-padded `HH:MM`, so that
/// stored values order the same way as the times they denote.
pub fn normalize_time_of_day(raw: &str) -> Option<String> {
    let caps = TIME_OF_DAY.captures(raw.trim())?;
    let hours: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minutes = caps.get(2)?.as_str();
    Some(format!("{hours:02}:{minutes}"))
}

#[derive(Debug, Clone)]
pub struct Trainstation {
    pub id: Uuid,
    pub name: String,
    pub open_hour: String,
    pub close_hour: String,
    pub image: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDeletable for Trainstation {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[derive(Debug, Clone)]
pub struct NewTrainstation {
    pub name: String,
    pub open_hour: String,
    pub close_hour: String,
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainstationPatch {
    pub name: Option<String>,
    pub open_hour: Option<String>,
    pub close_hour: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl TrainstationPatch {
    pub fn apply_to(&self, station: &mut Trainstation) {
        if let Some(name) = &self.name {
            station.name = name.clone();
        }
        if let Some(open) = &self.open_hour {
            station.open_hour = open.clone();
        }
        if let Some(close) = &self.close_hour {
            station.close_hour = close.clone();
        }
        if let Some(image) = &self.image {
            station.image = image.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainstationSort {
    Name,
    OpenHour,
    CloseHour,
}

impl SortField for TrainstationSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(TrainstationSort::Name),
            "open_hour" => Some(TrainstationSort::OpenHour),
            "close_hour" => Some(TrainstationSort::CloseHour),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            TrainstationSort::Name => "name",
            TrainstationSort::OpenHour => "open_hour",
            TrainstationSort::CloseHour => "close_hour",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_hours() {
        assert_eq!(normalize_time_of_day("08:00").as_deref(), Some("08:00"));
        assert_eq!(normalize_time_of_day("3:30").as_deref(), Some("03:30"));
        assert_eq!(normalize_time_of_day("23:59").as_deref(), Some("23:59"));
        assert_eq!(normalize_time_of_day(" 00:00 ").as_deref(), Some("00:00"));
    }

    #[test]
    fn rejects_invalid_hours() {
        for raw in ["24:00", "12:60", "1200", "ab:cd", "", "7:5", "123:00"] {
            assert!(normalize_time_of_day(raw).is_none(), "{raw} accepted");
        }
    }
}
