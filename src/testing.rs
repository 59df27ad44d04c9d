//! Fakes for the external collaborators, shared by handler and route tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::models::appointment::{AppointmentStatus, NewAppointment};
use crate::models::coordinate::Coordinate;
use crate::services::drive_time::DriveTimeProvider;
use crate::services::geocoder::Geocoder;
use crate::services::rate_limiter::{RateLimit, RateLimits};
use crate::services::store::memory::InMemoryStore;
use crate::state::AppState;

pub fn at(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

pub fn visit(name: &str, location: Coordinate, date: NaiveDate, time: &str, duration: u32) -> NewAppointment {
    NewAppointment {
        name: name.to_string(),
        address: format!("{name} street"),
        location,
        date,
        time: time.to_string(),
        duration,
        notes: String::new(),
        status: AppointmentStatus::Scheduled,
    }
}

#[derive(Default)]
pub struct FixedGeocoder {
    places: HashMap<String, Coordinate>,
    failing: bool,
}

impl FixedGeocoder {
    pub fn with(mut self, address: &str, location: Coordinate) -> Self {
        self.places.insert(address.to_string(), location);
        self
    }

    pub fn failing() -> Self {
        FixedGeocoder {
            places: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        if self.failing {
            return Err(ProviderError::Malformed("geocoder down".to_string()));
        }
        Ok(self.places.get(address).copied())
    }
}

/// Returns the same drive time for every pair and counts lookups.
pub struct FixedDriveTime {
    minutes: Option<f64>,
    failing: bool,
    pub calls: AtomicUsize,
}

impl FixedDriveTime {
    pub fn minutes(minutes: f64) -> Self {
        FixedDriveTime {
            minutes: Some(minutes),
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        FixedDriveTime {
            minutes: None,
            failing: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DriveTimeProvider for FixedDriveTime {
    async fn drive_minutes(
        &self,
        _from: Coordinate,
        _to: Coordinate,
    ) -> Result<Option<f64>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ProviderError::Malformed("routing down".to_string()));
        }
        Ok(self.minutes)
    }
}

pub fn generous_limits() -> RateLimits {
    let plenty = RateLimit::per_millis(1_000, 1_000);
    RateLimits {
        read: plenty,
        write: plenty,
        total_reads: plenty,
    }
}

pub fn state_with(
    store: InMemoryStore,
    geocoder: FixedGeocoder,
    drive_time: Arc<FixedDriveTime>,
    limits: RateLimits,
) -> AppState {
    AppState::new(Arc::new(store), Arc::new(geocoder), drive_time, limits)
}
