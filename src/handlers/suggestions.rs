//! Combines geocoding, proximity ranking, drive times and slot suggestion
//! into a single recommendation for where a new visit fits.

use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::errors::ApiError;
use crate::handlers::appointments::guard_reads;
use crate::models::appointment::Appointment;
use crate::models::coordinate::Coordinate;
use crate::models::schedule::{RankedAppointment, Recommendation, SuggestionRequest};
use crate::scheduling::constants::{
    CLOSEST_LIMIT, DEFAULT_NEARBY_RADIUS_KM, NEARBY_RADIUS_KM_MILES_UNIT,
};
use crate::scheduling::distance::{DistanceUnit, Nearby, find_nearby, format_distance, rank_by_distance};
use crate::scheduling::slot::suggest_slot;
use crate::state::AppState;

const MIN_ADDRESS_LEN: usize = 5;

async fn resolve_location(state: &AppState, request: &SuggestionRequest) -> Result<Coordinate, ApiError> {
    if let Some(location) = request.location {
        return Ok(location);
    }

    let address = request.address.as_deref().map(str::trim).unwrap_or_default();
    if address.is_empty() {
        return Err(ApiError::BadRequest(
            "either address or location is required".to_string(),
        ));
    }
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(ApiError::BadRequest(format!(
            "address must be at least {MIN_ADDRESS_LEN} characters"
        )));
    }

    match state.geocoder.geocode(address).await {
        Ok(Some(location)) => Ok(location),
        Ok(None) => Err(ApiError::NoMatch(address.to_string())),
        Err(e) => {
            error!("geocoding {:?} failed: {}", address, e);
            Err(e.into())
        }
    }
}

fn nearby_radius_km(unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Km => DEFAULT_NEARBY_RADIUS_KM,
        DistanceUnit::Mi => NEARBY_RADIUS_KM_MILES_UNIT,
    }
}

/// Looks up drive times one at a time; a failed lookup is logged and left empty.
async fn with_drive_times(
    state: &AppState,
    origin: Coordinate,
    ranked: &[Nearby],
    by_id: &HashMap<&str, &Appointment>,
    unit: DistanceUnit,
    known: &mut HashMap<String, Option<f64>>,
) -> Vec<RankedAppointment> {
    let mut out = Vec::with_capacity(ranked.len());

    for entry in ranked {
        let Some(appointment) = by_id.get(entry.id.as_str()) else {
            continue;
        };

        let drive_minutes = match known.get(&entry.id) {
            Some(minutes) => *minutes,
            None => {
                let minutes = match state.drive_time.drive_minutes(origin, appointment.location).await {
                    Ok(minutes) => minutes,
                    Err(e) => {
                        warn!("drive time to {} unavailable: {}", entry.id, e);
                        None
                    }
                };
                known.insert(entry.id.clone(), minutes);
                minutes
            }
        };

        out.push(RankedAppointment {
            id: appointment.id.clone(),
            name: appointment.name.clone(),
            address: appointment.address.clone(),
            date: appointment.date,
            time: appointment.time.clone(),
            distance_km: entry.distance_km,
            distance_display: format_distance(entry.distance_km, unit),
            drive_minutes,
        });
    }

    out
}

/// `"Sat, Jan 17 · near 0.8 mi · 4 min drive · try 09:00"`
pub fn describe(primary: &RankedAppointment, date: NaiveDate, time: &str) -> String {
    let drive = match primary.drive_minutes {
        Some(minutes) if minutes != 0.0 && !minutes.is_nan() => {
            format!(" · {} min drive", minutes.round() as i64)
        }
        _ => String::new(),
    };

    format!(
        "{} · near {}{} · try {}",
        date.format("%a, %b %-d"),
        primary.distance_display,
        drive,
        time
    )
}

pub async fn suggest(
    state: &AppState,
    rep_id: &str,
    request: SuggestionRequest,
) -> Result<Recommendation, ApiError> {
    if request.duration_minutes == 0 {
        return Err(ApiError::BadRequest(
            "duration_minutes must be greater than 0".to_string(),
        ));
    }

    guard_reads(state, rep_id)?;
    let location = resolve_location(state, &request).await?;
    let appointments = state.store.fetch_for_owner(rep_id).await?;

    if appointments.is_empty() {
        let date = request.date.unwrap_or_else(|| Local::now().date_naive());
        return Ok(Recommendation {
            location,
            date,
            time: suggest_slot(&appointments, date, request.duration_minutes),
            closest: Vec::new(),
            nearby: Vec::new(),
            message: None,
        });
    }

    let by_id: HashMap<&str, &Appointment> =
        appointments.iter().map(|a| (a.id.as_str(), a)).collect();
    let points = || appointments.iter().map(|a| (a.id.as_str(), a.location));

    let mut known = HashMap::new();

    let ranked: Vec<Nearby> = rank_by_distance(location, points())
        .into_iter()
        .take(CLOSEST_LIMIT)
        .collect();
    let closest = with_drive_times(state, location, &ranked, &by_id, request.unit, &mut known).await;

    let within: Vec<Nearby> = find_nearby(location, points(), nearby_radius_km(request.unit))
        .into_iter()
        .take(CLOSEST_LIMIT)
        .collect();
    let nearby = with_drive_times(state, location, &within, &by_id, request.unit, &mut known).await;

    let (date, time, message) = match closest.first() {
        Some(primary) => {
            let date = primary.date;
            let time = suggest_slot(&appointments, date, request.duration_minutes);
            let message = describe(primary, date, &time);
            (date, time, Some(message))
        }
        None => {
            let date = request.date.unwrap_or_else(|| Local::now().date_naive());
            (date, suggest_slot(&appointments, date, request.duration_minutes), None)
        }
    };

    info!(
        "suggested {} {} for rep {} ({} nearby)",
        date,
        time,
        rep_id,
        nearby.len()
    );

    Ok(Recommendation {
        location,
        date,
        time,
        closest,
        nearby,
        message,
    })
}
