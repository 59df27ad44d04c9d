pub mod appointments;
pub mod schedule;
pub mod suggestions;
