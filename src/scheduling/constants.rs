// work window, minutes since midnight
pub const WORK_START: i64 = 9 * 60;
pub const WORK_END: i64 = 17 * 60;

// candidate start times snap to this many minutes
pub const SLOT_STEP: i64 = 15;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

// returned when the day has no appointments or nothing fits
pub const OPENING_SLOT: &str = "09:00";

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const MILES_PER_KM: f64 = 0.621371;

pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 2.0;
// used when the rep displays miles (roughly one mile)
pub const NEARBY_RADIUS_KM_MILES_UNIT: f64 = 1.6;

// how many closest appointments get a drive time lookup
pub const CLOSEST_LIMIT: usize = 3;
