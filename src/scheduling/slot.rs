use chrono::NaiveDate;

use crate::scheduling::constants::{OPENING_SLOT, SLOT_STEP, WORK_END, WORK_START};

/// What the slot suggester needs to know about an existing appointment.
pub trait Booking {
    fn date(&self) -> NaiveDate;
    fn time(&self) -> &str;
    /// `None` falls back to the requested duration.
    fn duration(&self) -> Option<u32>;
}

impl<T: Booking + ?Sized> Booking for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn time(&self) -> &str {
        (**self).time()
    }

    fn duration(&self) -> Option<u32> {
        (**self).duration()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    start: i64,
    end: i64,
}

/// Minutes since midnight for an `HH:MM` string. Missing or garbled parts count as zero.
pub fn parse_minutes(time: &str) -> i64 {
    let mut parts = time.split(':').map(|p| p.trim().parse::<i64>().unwrap_or(0));
    let hours = parts.next().unwrap_or(0);
    let minutes = parts.next().unwrap_or(0);
    hours.saturating_mul(60).saturating_add(minutes)
}

pub fn format_minutes(total: i64) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn snap(minutes: i64) -> i64 {
    let remainder = minutes.rem_euclid(SLOT_STEP);
    if remainder == 0 {
        minutes
    } else {
        minutes.saturating_add(SLOT_STEP - remainder)
    }
}

/// Earliest `HH:MM` inside the work window where `duration_minutes` fits
/// around the bookings on `target_date`.
///
/// Returns `"09:00"` for an empty day, and also when nothing fits at all.
/// In the second case the slot is not guaranteed to be free.
pub fn suggest_slot<I>(appointments: I, target_date: NaiveDate, duration_minutes: u32) -> String
where
    I: IntoIterator,
    I::Item: Booking,
{
    let requested = i64::from(duration_minutes);

    let mut intervals: Vec<Interval> = appointments
        .into_iter()
        .filter(|apt| apt.date() == target_date)
        .map(|apt| {
            let start = parse_minutes(apt.time());
            let length = apt.duration().map(i64::from).unwrap_or(requested);
            Interval {
                start,
                end: start.saturating_add(length),
            }
        })
        .collect();

    if intervals.is_empty() {
        return OPENING_SLOT.to_string();
    }

    intervals.sort_by_key(|i| i.start);

    let mut cursor = WORK_START;
    for interval in &intervals {
        let candidate = snap(cursor);
        if candidate.saturating_add(requested) <= interval.start {
            return format_minutes(candidate);
        }
        cursor = cursor.max(interval.end);
    }

    let candidate = snap(cursor);
    if candidate.saturating_add(requested) <= WORK_END {
        return format_minutes(candidate);
    }

    OPENING_SLOT.to_string()
}
