use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    LookupError, Temperature, WeatherInfo,
    provider::{ProviderId, WeatherProvider},
};

const FETCH_FAILED: &str = "Failed to fetch weather data";
const DEFAULT_UNIT: &str = "°C";

/// Forecast client for the Open-Meteo `/v1/forecast` endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct OmCurrentUnits {
    temperature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmHourlyUnits {
    temperature_2m: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
    current_weather_units: Option<OmCurrentUnits>,
    hourly: Option<OmHourly>,
    hourly_units: Option<OmHourlyUnits>,
}

impl From<OmResponse> for WeatherInfo {
    fn from(parsed: OmResponse) -> Self {
        let unit = parsed
            .current_weather_units
            .and_then(|u| u.temperature)
            .or_else(|| parsed.hourly_units.and_then(|u| u.temperature_2m))
            .unwrap_or_else(|| DEFAULT_UNIT.to_string());

        let hourly_temperatures = parsed
            .hourly
            .map(|h| h.temperature_2m.into_iter().flatten().collect())
            .unwrap_or_default();

        Self {
            temperature: Temperature {
                value: parsed.current_weather.temperature,
                unit,
            },
            weather_code: parsed.current_weather.weathercode,
            hourly_temperatures,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self), fields(provider = %ProviderId::OpenMeteo))]
    async fn resolve_weather(&self, lat: &str, lon: &str) -> Result<WeatherInfo, LookupError> {
        debug!(url = %self.base_url, "Fetching current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat),
                ("longitude", lon),
                ("hourly", "temperature_2m"),
                ("temperature_unit", "celsius"),
                ("current_weather", "true"),
                ("forecast_days", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Weather request could not be sent");
                LookupError::provider(ProviderId::OpenMeteo, FETCH_FAILED)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, "Weather provider returned an error status");
            return Err(LookupError::provider(ProviderId::OpenMeteo, FETCH_FAILED));
        }

        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read weather response body");
            LookupError::provider(ProviderId::OpenMeteo, FETCH_FAILED)
        })?;

        let parsed: OmResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Weather response has an unexpected shape");
            LookupError::Validation(format!("malformed weather payload: {e}"))
        })?;

        Ok(parsed.into())
    }
}
