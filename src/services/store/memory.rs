//! In-memory appointment store.
//!
//! Used for local development when no MongoDB is configured, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{AppointmentStore, sort_chronologically};
use crate::errors::{StoreError, StoreResult};
use crate::models::appointment::{Appointment, AppointmentPatch, NewAppointment};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    appointments: Arc<RwLock<HashMap<String, Appointment>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts seed data without going through rate limits or validation.
    pub fn seed<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = (String, NewAppointment)>,
    {
        let mut map = self.write();
        let mut count = 0;
        for (owner_id, draft) in rows {
            let appointment = draft.into_appointment(Uuid::new_v4().to_string(), owner_id);
            map.insert(appointment.id.clone(), appointment);
            count += 1;
        }
        count
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Appointment>> {
        self.appointments.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Appointment>> {
        self.appointments.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn fetch_for_owner(&self, owner_id: &str) -> StoreResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .read()
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect();
        sort_chronologically(&mut found);
        Ok(found)
    }

    async fn create(&self, owner_id: &str, appointment: NewAppointment) -> StoreResult<Appointment> {
        let appointment =
            appointment.into_appointment(Uuid::new_v4().to_string(), owner_id.to_string());

        let mut map = self.write();
        if map.contains_key(&appointment.id) {
            return Err(StoreError::AlreadyExists(appointment.id));
        }
        map.insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, id: &str, patch: AppointmentPatch) -> StoreResult<Appointment> {
        let mut map = self.write();
        let appointment = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(appointment);
        Ok(appointment.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
