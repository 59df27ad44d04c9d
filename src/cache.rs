use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::models::coordinate::Coordinate;
use crate::services::geocoder::Geocoder;

const GEOCODE_CACHE_CAPACITY: u64 = 10_000;

/// Remembers geocoder answers (including "no match") per normalised address,
/// so repeated lookups while a rep edits a form hit the provider once.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Cache<String, Option<Coordinate>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, ttl: Duration) -> Self {
        CachedGeocoder {
            inner,
            cache: Cache::builder()
                .max_capacity(GEOCODE_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build(),
        }
    }
}

fn cache_key(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        let key = cache_key(address);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        // errors are not cached
        let found = self.inner.geocode(address).await?;
        self.cache.insert(key, found).await;
        Ok(found)
    }
}
