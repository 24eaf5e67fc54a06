use crate::{
    AppConfig, LocationInfo, LookupError, WeatherInfo,
    provider::{nominatim::NominatimProvider, openmeteo::OpenMeteoProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};
use tracing::{debug, instrument};

pub mod nominatim;
pub mod openmeteo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Nominatim,
    OpenMeteo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Nominatim => "nominatim",
            ProviderId::OpenMeteo => "open-meteo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Nominatim, ProviderId::OpenMeteo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "nominatim" => Ok(ProviderId::Nominatim),
            "open-meteo" | "openmeteo" => Ok(ProviderId::OpenMeteo),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: nominatim, open-meteo."
            )),
        }
    }
}

/// Turns a free-text place name into coordinates and a display name.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn resolve_location(&self, query: &str) -> Result<LocationInfo, LookupError>;
}

/// Fetches current conditions for coordinates produced by a [`LocationProvider`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn resolve_weather(&self, lat: &str, lon: &str) -> Result<WeatherInfo, LookupError>;
}

/// Both resolvers, built from config and sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct Providers {
    pub locations: Arc<dyn LocationProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl Providers {
    pub fn new(locations: Arc<dyn LocationProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { locations, weather }
    }

    /// Resolve `query` to a location, then fetch the weather there.
    ///
    /// The weather call needs the coordinates, so the two requests run in
    /// sequence and the first failure ends the lookup.
    #[instrument(skip(self))]
    pub async fn lookup(&self, query: &str) -> Result<Lookup, LookupError> {
        let location = self.locations.resolve_location(query).await?;
        debug!(display_name = %location.display_name, "Location resolved");

        let weather = self
            .weather
            .resolve_weather(&location.latitude, &location.longitude)
            .await?;

        Ok(Lookup { location, weather })
    }
}

/// Result of a successful [`Providers::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub location: LocationInfo,
    pub weather: WeatherInfo,
}

/// Construct both providers from config.
pub fn providers_from_config(config: &AppConfig) -> anyhow::Result<Providers> {
    let http = Client::new();

    let geocode_url = required_base_url(config, ProviderId::Nominatim)?;
    let forecast_url = required_base_url(config, ProviderId::OpenMeteo)?;

    let mut nominatim = NominatimProvider::with_client(http.clone(), geocode_url);
    if let Some(agent) = config.provider_user_agent(ProviderId::Nominatim) {
        nominatim = nominatim.user_agent(agent);
    }

    Ok(Providers {
        locations: Arc::new(nominatim),
        weather: Arc::new(OpenMeteoProvider::with_client(http, forecast_url)),
    })
}

fn required_base_url(config: &AppConfig, id: ProviderId) -> anyhow::Result<String> {
    config.provider_base_url(id).map(str::to_owned).ok_or_else(|| {
        anyhow::anyhow!(
            "No base URL configured for provider '{id}'.\n\
                 Hint: run `weather-web configure {id}` and enter the endpoint URL."
        )
    })
}
