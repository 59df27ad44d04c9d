use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::errors::ProviderError;
use crate::models::coordinate::Coordinate;

/// Turns a free-text address into a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the address has no match.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Geocoder backed by an OpenStreetMap Nominatim instance.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<String>,
    lon: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: &str, user_agent: &str) -> Self {
        NominatimGeocoder {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    fn search_url(&self, address: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[("format", "json"), ("q", address), ("limit", "1")],
        )
        .map_err(|e| ProviderError::Malformed(format!("bad geocoder url: {e}")))
    }
}

fn first_match(places: &[NominatimPlace]) -> Option<Coordinate> {
    let place = places.first()?;
    let lat = place.lat.as_deref()?.parse::<f64>().ok()?;
    let lng = place.lon.as_deref()?.parse::<f64>().ok()?;
    Coordinate::new(lat, lng).ok()
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = self.search_url(address)?;

        let places: Vec<NominatimPlace> = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let found = first_match(&places);
        info!("geocoded {:?} -> {:?}", address, found);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_encoded_search_url() {
        let geocoder = NominatimGeocoder::new(
            reqwest::Client::new(),
            "https://nominatim.example.org/",
            "test-agent",
        );
        let url = geocoder.search_url("400 S Akard St, Dallas").unwrap();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "400 S Akard St, Dallas".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "1".to_string())));
        assert!(pairs.contains(&("format".to_string(), "json".to_string())));
    }

    #[test]
    fn reads_first_place() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat": "32.7763", "lon": "-96.7969", "display_name": "Dallas"},
                {"lat": "1.0", "lon": "1.0"}]"#,
        )
        .unwrap();
        let found = first_match(&places).unwrap();
        assert_eq!(found.lat(), 32.7763);
        assert_eq!(found.lng(), -96.7969);
    }

    #[test]
    fn empty_or_partial_results_are_no_match() {
        assert!(first_match(&[]).is_none());

        let partial: Vec<NominatimPlace> = serde_json::from_str(r#"[{"lat": "32.7"}]"#).unwrap();
        assert!(first_match(&partial).is_none());

        let garbage: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": "north", "lon": "-96.7"}]"#).unwrap();
        assert!(first_match(&garbage).is_none());
    }
}
