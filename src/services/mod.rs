pub mod drive_time;
pub mod geocoder;
pub mod rate_limiter;
pub mod store;
