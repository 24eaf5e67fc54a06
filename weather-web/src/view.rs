//! Request-scoped view models handed to the templates.

use chrono::NaiveDate;
use serde::Serialize;
use weather_core::{LocationInfo, WeatherInfo};

/// Format used for the date line, e.g. `Fri Oct 16 2026`.
pub const DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub temperature: String,
    pub unit: String,
    pub weathercode: i32,
    pub condition: &'static str,
    pub condition_img: &'static str,
    pub low_temp: Option<String>,
    pub high_temp: Option<String>,
}

/// Context of the weather page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub environment: String,
    pub location: String,
    pub current_date: String,
    pub weather: WeatherView,
}

impl ViewModel {
    pub fn build(
        environment: &str,
        location: &LocationInfo,
        weather: &WeatherInfo,
        today: NaiveDate,
    ) -> Self {
        let condition = weather.weather_condition();

        Self {
            environment: environment.to_string(),
            location: location.display_name.clone(),
            current_date: today.format(DATE_FORMAT).to_string(),
            weather: WeatherView {
                temperature: format_temp(weather.temperature.value),
                unit: weather.temperature.unit.clone(),
                weathercode: weather.weather_code,
                condition: condition.label(),
                condition_img: condition.icon(),
                low_temp: weather.low_temp().map(format_temp),
                high_temp: weather.high_temp().map(format_temp),
            },
        }
    }
}

/// Context of the landing ("get started") page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingModel {
    pub environment: String,
}

impl LandingModel {
    pub fn new(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
        }
    }
}

// `20.0` renders as "20", `21.4` as "21.4".
fn format_temp(value: f64) -> String {
    value.to_string()
}
