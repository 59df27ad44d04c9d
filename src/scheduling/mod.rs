pub mod constants;
pub mod distance;
pub mod slot;
