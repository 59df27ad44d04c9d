use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::warn;

use crate::models::appointment::{AppointmentStatus, NewAppointment};
use crate::models::calendar_date;
use crate::models::coordinate::Coordinate;

#[derive(Debug, Deserialize)]
struct SeedRow {
    owner_id: String,
    name: String,
    address: String,
    lat: f64,
    lng: f64,
    date: String,
    time: String,
    duration: u32,
    #[serde(default)]
    notes: Option<String>,
}

impl SeedRow {
    fn into_draft(self) -> Option<(String, NewAppointment)> {
        let location = Coordinate::new(self.lat, self.lng).ok()?;
        let date = calendar_date::parse(&self.date)?;
        let draft = NewAppointment {
            name: self.name,
            address: self.address,
            location,
            date,
            time: self.time,
            duration: self.duration,
            notes: self.notes.unwrap_or_default(),
            status: AppointmentStatus::Scheduled,
        };
        draft.validate().ok()?;
        Some((self.owner_id, draft))
    }
}

/// Reads demo appointments from a CSV file with a header row:
/// `owner_id,name,address,lat,lng,date,time,duration,notes`.
/// Bad rows are logged and skipped.
pub fn load_seed_appointments(path: impl AsRef<Path>) -> Result<Vec<(String, NewAppointment)>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<SeedRow>().enumerate() {
        match result.map(SeedRow::into_draft) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => warn!("skipping invalid seed row {}", line + 2),
            Err(e) => warn!("skipping unreadable seed row {}: {}", line + 2, e),
        }
    }

    Ok(rows)
}
