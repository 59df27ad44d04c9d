use serde::{Deserialize, Serialize};

use crate::models::coordinate::Coordinate;
use crate::scheduling::constants::{EARTH_RADIUS_KM, MILES_PER_KM};

/// Great-circle distance in kilometers (Haversine).
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat().to_radians().cos() * b.lat().to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearby {
    pub id: String,
    pub distance_km: f64,
}

/// Every point with its distance from `center`, closest first.
/// Equal distances keep their input order.
pub fn rank_by_distance<'a, I>(center: Coordinate, points: I) -> Vec<Nearby>
where
    I: IntoIterator<Item = (&'a str, Coordinate)>,
{
    let mut ranked: Vec<Nearby> = points
        .into_iter()
        .map(|(id, point)| Nearby {
            id: id.to_string(),
            distance_km: distance(center, point),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Points within `radius_km` of `center`, closest first.
pub fn find_nearby<'a, I>(center: Coordinate, points: I, radius_km: f64) -> Vec<Nearby>
where
    I: IntoIterator<Item = (&'a str, Coordinate)>,
{
    rank_by_distance(center, points)
        .into_iter()
        .filter(|n| n.distance_km <= radius_km)
        .collect()
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    #[default]
    Mi,
}

/// Display form with one decimal, e.g. `"1.2 mi"`.
pub fn format_distance(km: f64, unit: DistanceUnit) -> String {
    if km.is_nan() {
        return String::new();
    }
    match unit {
        DistanceUnit::Km => format!("{:.1} km", km),
        DistanceUnit::Mi => format!("{:.1} mi", km_to_miles(km)),
    }
}
