use tracing::info;

use crate::errors::ApiError;
use crate::models::appointment::{Appointment, AppointmentPatch, NewAppointment};
use crate::state::AppState;

const TOTAL_READS_KEY: &str = "reads:total";
const WRITE_KEY: &str = "write";

/// Applies the per-rep and global read limits. A call rejected by either
/// limit counts against neither.
pub fn guard_reads(state: &AppState, rep_id: &str) -> Result<(), ApiError> {
    let rep_key = format!("read:{rep_id}");
    state
        .limiter
        .try_acquire_all(&[
            (rep_key.as_str(), state.limits.read),
            (TOTAL_READS_KEY, state.limits.total_reads),
        ])
        .map_err(|key| ApiError::RateLimited(key.to_string()))
}

fn guard_writes(state: &AppState) -> Result<(), ApiError> {
    if !state.limiter.try_acquire(WRITE_KEY, state.limits.write) {
        return Err(ApiError::RateLimited(WRITE_KEY.to_string()));
    }
    Ok(())
}

pub async fn list_appointments(state: &AppState, rep_id: &str) -> Result<Vec<Appointment>, ApiError> {
    guard_reads(state, rep_id)?;
    Ok(state.store.fetch_for_owner(rep_id).await?)
}

pub async fn create_appointment(
    state: &AppState,
    rep_id: &str,
    draft: NewAppointment,
) -> Result<Appointment, ApiError> {
    draft.validate().map_err(ApiError::Validation)?;
    guard_writes(state)?;

    let created = state.store.create(rep_id, draft).await?;
    info!("created appointment {} for rep {}", created.id, rep_id);
    Ok(created)
}

pub async fn update_appointment(
    state: &AppState,
    id: &str,
    patch: AppointmentPatch,
) -> Result<Appointment, ApiError> {
    patch.validate().map_err(ApiError::Validation)?;
    guard_writes(state)?;

    let updated = state.store.update(id, patch).await?;
    info!("updated appointment {}", id);
    Ok(updated)
}

pub async fn delete_appointment(state: &AppState, id: &str) -> Result<(), ApiError> {
    guard_writes(state)?;
    state.store.delete(id).await?;
    info!("deleted appointment {}", id);
    Ok(())
}
