use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::calendar_date;
use crate::models::coordinate::Coordinate;
use crate::scheduling::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_NEARBY_RADIUS_KM};
use crate::scheduling::distance::DistanceUnit;
use crate::scheduling::slot::Booking;

/// A booking as sent by clients that only care about timing.
#[derive(Debug, Clone, Deserialize)]
pub struct BookedSlot {
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub time: String,
    pub duration: Option<u32>,
}

impl Booking for BookedSlot {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> &str {
        &self.time
    }

    fn duration(&self) -> Option<u32> {
        self.duration
    }
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS_KM
}

#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    #[serde(default)]
    pub appointments: Vec<BookedSlot>,
    #[serde(with = "calendar_date")]
    pub target_date: NaiveDate,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotResponse {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub kilometers: f64,
    pub miles: f64,
}

#[derive(Debug, Deserialize)]
pub struct NamedPoint {
    pub id: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub center: Coordinate,
    #[serde(default)]
    pub points: Vec<NamedPoint>,
    #[serde(default = "default_radius")]
    pub radius_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub address: Option<String>,
    pub location: Option<Coordinate>,
    /// Day shown to the rep; used when they have no appointments yet.
    #[serde(default, with = "calendar_date::option")]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub unit: DistanceUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAppointment {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub time: String,
    pub distance_km: f64,
    pub distance_display: String,
    pub drive_minutes: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub location: Coordinate,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub time: String,
    pub closest: Vec<RankedAppointment>,
    pub nearby: Vec<RankedAppointment>,
    pub message: Option<String>,
}
