use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

/// A scheduled route between two stations.
///
/// `active` and `deleted_at` are independent: a station deletion only clears
/// `active`, which an admin may set again later.
#[derive(Debug, Clone)]
pub struct Train {
    pub id: Uuid,
    pub name: String,
    pub start_station: Uuid,
    pub end_station: Uuid,
    pub departure_time: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Train {
    pub fn serves(&self, station_id: Uuid) -> bool {
        self.start_station == station_id || self.end_station == station_id
    }
}

impl SoftDeletable for Train {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[derive(Debug, Clone)]
pub struct NewTrain {
    pub name: String,
    pub start_station: Uuid,
    pub end_station: Uuid,
    pub departure_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainPatch {
    pub name: Option<String>,
    pub start_station: Option<Uuid>,
    pub end_station: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl TrainPatch {
    pub fn station_refs(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.start_station.iter().chain(self.end_station.iter()).copied()
    }

    pub fn apply_to(&self, train: &mut Train) {
        if let Some(name) = &self.name {
            train.name = name.clone();
        }
        if let Some(start) = self.start_station {
            train.start_station = start;
        }
        if let Some(end) = self.end_station {
            train.end_station = end;
        }
        if let Some(departure) = self.departure_time {
            train.departure_time = departure;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainSort {
    Name,
    DepartureTime,
    Active,
    CreatedAt,
}

impl SortField for TrainSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(TrainSort::Name),
            "departure_time" => Some(TrainSort::DepartureTime),
            "active" => Some(TrainSort::Active),
            "created_at" => Some(TrainSort::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            TrainSort::Name => "name",
            TrainSort::DepartureTime => "departure_time",
            TrainSort::Active => "active",
            TrainSort::CreatedAt => "created_at",
        }
    }
}
