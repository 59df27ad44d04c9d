use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::coordinate::Coordinate;

/// Travel time between two points, from an external routing service.
#[async_trait]
pub trait DriveTimeProvider: Send + Sync {
    /// Minutes by car, or `None` when no route exists.
    async fn drive_minutes(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<f64>, ProviderError>;
}

/// Drive times from an OSRM routing server.
pub struct OsrmDriveTime {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64, // seconds
}

impl OsrmDriveTime {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        OsrmDriveTime {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // OSRM wants lng,lat pairs
    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=false",
            self.base_url,
            from.lng(),
            from.lat(),
            to.lng(),
            to.lat()
        )
    }
}

fn minutes_from(response: OsrmResponse) -> Option<f64> {
    if response.code != "Ok" {
        return None;
    }
    response.routes.first().map(|r| r.duration / 60.0)
}

#[async_trait]
impl DriveTimeProvider for OsrmDriveTime {
    async fn drive_minutes(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<f64>, ProviderError> {
        let response: OsrmResponse = self
            .client
            .get(self.route_url(from, to))
            .send()
            .await?
            .json()
            .await?;

        Ok(minutes_from(response))
    }
}
