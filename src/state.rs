use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::cache::CachedGeocoder;
use crate::config::Config;
use crate::services::drive_time::{DriveTimeProvider, OsrmDriveTime};
use crate::services::geocoder::{Geocoder, NominatimGeocoder};
use crate::services::rate_limiter::{RateLimiter, RateLimits};
use crate::services::store::AppointmentStore;
use crate::services::store::memory::InMemoryStore;
use crate::services::store::mongo::MongoStore;
use crate::services::store::seed::load_seed_appointments;

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AppointmentStore>,
    pub geocoder: Arc<dyn Geocoder>,
    pub drive_time: Arc<dyn DriveTimeProvider>,
    pub limiter: Arc<RateLimiter>,
    pub limits: RateLimits,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        geocoder: Arc<dyn Geocoder>,
        drive_time: Arc<dyn DriveTimeProvider>,
        limits: RateLimits,
    ) -> Self {
        AppState {
            store,
            geocoder,
            drive_time,
            limiter: Arc::new(RateLimiter::new()),
            limits,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn AppointmentStore> = match &config.mongodb_uri {
            Some(uri) => Arc::new(
                MongoStore::connect(uri, &config.mongodb_database)
                    .await
                    .context("failed to connect to mongodb")?,
            ),
            None => {
                let store = InMemoryStore::new();
                if let Some(path) = &config.seed_csv {
                    let seeded = store.seed(load_seed_appointments(path)?);
                    info!("seeded {} appointments from {}", seeded, path);
                }
                info!("MONGODB_URI not set, using in-memory store");
                Arc::new(store)
            }
        };

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("failed to build http client")?;

        let geocoder = CachedGeocoder::new(
            NominatimGeocoder::new(client.clone(), &config.nominatim_url, &config.user_agent),
            config.geocode_cache_ttl,
        );
        let drive_time = OsrmDriveTime::new(client, &config.osrm_url);

        Ok(AppState::new(
            store,
            Arc::new(geocoder),
            Arc::new(drive_time),
            config.rate_limits,
        ))
    }
}
