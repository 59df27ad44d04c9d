use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::calendar_date;
use crate::models::coordinate::Coordinate;
use crate::scheduling::slot::Booking;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").expect("valid time regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// A stored visit on a rep's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub time: String, // HH:MM, 24h
    pub duration: u32, // minutes
    pub notes: String,
    pub status: AppointmentStatus,
}

impl Booking for Appointment {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> &str {
        &self.time
    }

    fn duration(&self) -> Option<u32> {
        Some(self.duration)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub time: String,
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinate>,
    #[serde(default, with = "calendar_date::option")]
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        FieldError { field, message }
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
}

fn check_address(address: &str, errors: &mut Vec<FieldError>) {
    if address.trim().is_empty() {
        errors.push(FieldError::new("address", "Address is required"));
    }
}

fn check_time(time: &str, errors: &mut Vec<FieldError>) {
    if time.trim().is_empty() {
        errors.push(FieldError::new("time", "Time is required"));
    } else if !TIME_PATTERN.is_match(time.trim()) {
        errors.push(FieldError::new("time", "Time must be HH:MM"));
    }
}

fn check_duration(duration: u32, errors: &mut Vec<FieldError>) {
    if duration == 0 {
        errors.push(FieldError::new(
            "duration",
            "Duration must be greater than 0",
        ));
    }
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_address(&self.address, &mut errors);
        check_time(&self.time, &mut errors);
        check_duration(self.duration, &mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn into_appointment(self, id: String, owner_id: String) -> Appointment {
        Appointment {
            id,
            owner_id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            location: self.location,
            date: self.date,
            time: self.time.trim().to_string(),
            duration: self.duration,
            notes: self.notes,
            status: self.status,
        }
    }
}

impl AppointmentPatch {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(address) = &self.address {
            check_address(address, &mut errors);
        }
        if let Some(time) = &self.time {
            check_time(time, &mut errors);
        }
        if let Some(duration) = self.duration {
            check_duration(duration, &mut errors);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(name) = self.name {
            appointment.name = name.trim().to_string();
        }
        if let Some(address) = self.address {
            appointment.address = address.trim().to_string();
        }
        if let Some(location) = self.location {
            appointment.location = location;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time.trim().to_string();
        }
        if let Some(duration) = self.duration {
            appointment.duration = duration;
        }
        if let Some(notes) = self.notes {
            appointment.notes = notes;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewAppointment {
        NewAppointment {
            name: "John Smith".into(),
            address: "400 S Akard St, Dallas, TX 75202".into(),
            location: Coordinate::new(32.7763, -96.7969).unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
            time: "10:00".into(),
            duration: 30,
            notes: String::new(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let mut bad = draft();
        bad.name = "  ".into();
        bad.address = String::new();
        bad.time = "25:99".into();
        bad.duration = 0;

        let errors = bad.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "address", "time", "duration"]);
    }

    #[test]
    fn single_digit_hour_is_accepted() {
        let mut early = draft();
        early.time = "9:15".into();
        assert!(early.validate().is_ok());
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut appointment = draft().into_appointment("a1".into(), "rep-1".into());
        let patch = AppointmentPatch {
            time: Some("11:30".into()),
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        patch.apply(&mut appointment);

        assert_eq!(appointment.time, "11:30");
        assert_eq!(appointment.status, AppointmentStatus::Completed);
        assert_eq!(appointment.name, "John Smith");
        assert_eq!(appointment.duration, 30);
    }

    #[test]
    fn patch_deserializes_timestamp_dates() {
        let patch: AppointmentPatch =
            serde_json::from_str(r#"{"date": "2026-01-18T08:00:00.000Z"}"#).unwrap();
        assert_eq!(patch.date, NaiveDate::from_ymd_opt(2026, 1, 18));
        assert!(patch.name.is_none());
    }
}
