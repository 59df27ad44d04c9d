pub mod memory;
pub mod mongo;
pub mod seed;

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::models::appointment::{Appointment, AppointmentPatch, NewAppointment};
use crate::scheduling::slot::parse_minutes;

/// Persistence for reps' appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// All appointments owned by `owner_id`, earliest first.
    async fn fetch_for_owner(&self, owner_id: &str) -> StoreResult<Vec<Appointment>>;

    async fn create(&self, owner_id: &str, appointment: NewAppointment) -> StoreResult<Appointment>;

    async fn update(&self, id: &str, patch: AppointmentPatch) -> StoreResult<Appointment>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

pub(crate) fn sort_chronologically(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|a| (a.date, parse_minutes(&a.time)));
}
