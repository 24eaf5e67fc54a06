//! Core library for the weather web app.
//!
//! This crate defines:
//! - Configuration loading and persistence
//! - The location and weather resolvers (geocoding + forecast providers)
//! - Shared domain models and the weather code table
//!
//! It is used by `weather-web`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use condition::WeatherCondition;
pub use config::{AppConfig, ProviderConfig, ServerConfig};
pub use error::LookupError;
pub use model::{LocationInfo, Temperature, WeatherInfo};
pub use provider::{LocationProvider, Lookup, ProviderId, Providers, WeatherProvider};
