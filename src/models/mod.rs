pub mod appointment;
pub mod calendar_date;
pub mod coordinate;
pub mod schedule;
