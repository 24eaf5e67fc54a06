use serde::{Deserialize, Serialize};

use crate::condition::WeatherCondition;

/// First geocoding match for a free-text query.
///
/// Coordinates are kept as the strings the geocoder returned and handed to
/// the weather provider unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub latitude: String,
    pub longitude: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: String,
}

/// Current conditions plus today's hourly temperature series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub temperature: Temperature,
    pub weather_code: i32,
    pub hourly_temperatures: Vec<f64>,
}

impl WeatherInfo {
    pub fn weather_condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.weather_code)
    }

    /// Human-readable condition label; defined for every weather code.
    pub fn condition(&self) -> &'static str {
        self.weather_condition().label()
    }

    /// Lowest hourly temperature of the day, if the provider sent a series.
    pub fn low_temp(&self) -> Option<f64> {
        self.hourly_temperatures.iter().copied().reduce(f64::min)
    }

    /// Highest hourly temperature of the day, if the provider sent a series.
    pub fn high_temp(&self) -> Option<f64> {
        self.hourly_temperatures.iter().copied().reduce(f64::max)
    }
}
