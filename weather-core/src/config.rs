use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_USER_AGENT: &str = "Weather-App (contact@example.com)";

/// Configuration for a single provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,

    /// Sent as `User-Agent`; only the geocoder requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// HTTP listener and asset locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Directory served under `/static`. Falls back to the assets in the
    /// source checkout the binary was built from, so installed binaries must set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,

    /// Directory with `*.html` templates overriding the embedded ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8089,
            static_dir: None,
            templates_dir: None,
        }
    }
}

/// Top-level configuration, loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Runtime tag handed to the templates, e.g. "development" or "production".
    pub environment: String,

    pub server: ServerConfig,

    /// Example TOML:
    /// [providers.open-meteo]
    /// base_url = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            ProviderId::Nominatim.as_str().to_string(),
            ProviderConfig {
                base_url: DEFAULT_GEOCODE_URL.to_string(),
                user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            },
        );
        providers.insert(
            ProviderId::OpenMeteo.as_str().to_string(),
            ProviderConfig {
                base_url: DEFAULT_FORECAST_URL.to_string(),
                user_agent: None,
            },
        );

        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            providers,
        }
    }
}

impl AppConfig {
    /// Load config from the platform config directory, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file. Missing sections keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg.with_default_providers())
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-app", "weather-web")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    pub fn provider_base_url(&self, id: ProviderId) -> Option<&str> {
        self.provider_config(id).map(|cfg| cfg.base_url.as_str())
    }

    /// User agent for `id`; the geocoder always gets one.
    pub fn provider_user_agent(&self, id: ProviderId) -> Option<&str> {
        let configured = self.provider_config(id).and_then(|cfg| cfg.user_agent.as_deref());

        match id {
            ProviderId::Nominatim => Some(configured.unwrap_or(DEFAULT_USER_AGENT)),
            ProviderId::OpenMeteo => configured,
        }
    }

    /// Set/replace a provider base URL, keeping any configured user agent.
    pub fn upsert_provider_base_url(&mut self, id: ProviderId, base_url: String) {
        self.providers
            .entry(id.as_str().to_string())
            .and_modify(|cfg| cfg.base_url = base_url.clone())
            .or_insert(ProviderConfig {
                base_url,
                user_agent: None,
            });
    }

    pub fn set_provider_user_agent(&mut self, id: ProviderId, user_agent: Option<String>) {
        if let Some(cfg) = self.providers.get_mut(id.as_str()) {
            cfg.user_agent = user_agent;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    // A file that only lists one provider still gets the default for the other.
    fn with_default_providers(mut self) -> Self {
        for (name, cfg) in AppConfig::default().providers {
            self.providers.entry(name).or_insert(cfg);
        }
        self
    }
}
