use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::USER_AGENT};
use serde::{Deserialize, de::Error as _};
use tracing::{debug, instrument, warn};

use crate::{
    LocationInfo, LookupError,
    config::DEFAULT_USER_AGENT,
    provider::{LocationProvider, ProviderId},
};

const FETCH_FAILED: &str = "Error fetching location data";

/// Geocoder speaking the Nominatim search API (`q`, `format=json`, `limit`).
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    base_url: String,
    user_agent: String,
    http: Client,
}

impl NominatimProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http,
        }
    }

    /// Nominatim's usage policy requires an identifying agent on every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

/// Shape every geocoding result must have; other fields are ignored.
#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl From<NmPlace> for LocationInfo {
    fn from(place: NmPlace) -> Self {
        Self {
            latitude: place.lat,
            longitude: place.lon,
            display_name: place.display_name,
        }
    }
}

#[async_trait]
impl LocationProvider for NominatimProvider {
    #[instrument(skip(self), fields(provider = %ProviderId::Nominatim))]
    async fn resolve_location(&self, query: &str) -> Result<LocationInfo, LookupError> {
        debug!(url = %self.base_url, "Fetching location");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Geocoding request could not be sent");
                LookupError::provider(ProviderId::Nominatim, FETCH_FAILED)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, "Geocoding provider returned an error status");
            return Err(LookupError::provider(ProviderId::Nominatim, FETCH_FAILED));
        }

        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read geocoding response body");
            LookupError::provider(ProviderId::Nominatim, FETCH_FAILED)
        })?;

        first_place(&body).map(LocationInfo::from).map_err(|e| {
            warn!(error = %e, "Geocoding response has no usable first result");
            LookupError::NotFound(query.to_string())
        })
    }
}

fn first_place(body: &str) -> Result<NmPlace, serde_json::Error> {
    let mut results: Vec<serde_json::Value> = serde_json::from_str(body)?;
    if results.is_empty() {
        return Err(serde_json::Error::custom("empty result list"));
    }

    serde_json::from_value(results.swap_remove(0))
}
