use crate::errors::ApiError;
use crate::models::schedule::{
    DistanceRequest, DistanceResponse, NearbyRequest, SlotRequest, SlotResponse,
};
use crate::scheduling::distance::{Nearby, distance, find_nearby, km_to_miles};
use crate::scheduling::slot::suggest_slot;

pub fn measure(request: &DistanceRequest) -> DistanceResponse {
    let kilometers = distance(request.from, request.to);
    DistanceResponse {
        kilometers,
        miles: km_to_miles(kilometers),
    }
}

pub fn nearby(request: &NearbyRequest) -> Result<Vec<Nearby>, ApiError> {
    if !request.radius_km.is_finite() || request.radius_km < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "radius_km must be a non-negative number, got {}",
            request.radius_km
        )));
    }

    let points = request.points.iter().map(|p| (p.id.as_str(), p.location));
    Ok(find_nearby(request.center, points, request.radius_km))
}

pub fn slot(request: &SlotRequest) -> Result<SlotResponse, ApiError> {
    if request.duration_minutes == 0 {
        return Err(ApiError::BadRequest(
            "duration_minutes must be greater than 0".to_string(),
        ));
    }

    Ok(SlotResponse {
        time: suggest_slot(&request.appointments, request.target_date, request.duration_minutes),
    })
}
