use serde::Serialize;

/// Condition category derived from a provider weather code (WMO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Map a weather code to its condition. Every code maps to exactly one
    /// condition; unlisted codes are `Unknown`.
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 | 1 => Self::Clear,
            2 => Self::Cloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    /// Path of the icon served from the static directory.
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "/static/img/clear.svg",
            Self::Cloudy => "/static/img/cloudy.svg",
            Self::Overcast => "/static/img/overcast.svg",
            Self::Fog => "/static/img/fog.svg",
            Self::Drizzle => "/static/img/drizzle.svg",
            Self::Rain => "/static/img/rain.svg",
            Self::Snow => "/static/img/snow.svg",
            Self::Thunderstorm => "/static/img/thunderstorm.svg",
            Self::Unknown => "/static/img/info.svg",
        }
    }
}

impl From<i32> for WeatherCondition {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
