use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current conditions, taken verbatim from the provider's current-weather
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temp: f64,
    pub description: String,
    pub icon: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub feels_like: f64,
    /// Offset from UTC in seconds at the reported location.
    pub timezone_offset: i32,
}

/// One 3-hourly forecast sample, listed under its day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSample {
    pub time: String,
    pub temp: f64,
    pub icon: String,
    pub description: String,
}

/// Aggregate of all forecast samples sharing one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Human-readable day heading, e.g. "Mon, Jun 3".
    pub label: String,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Icon and description of the first sample seen for this date.
    pub icon: String,
    pub description: String,
    pub details: Vec<DetailSample>,
}

/// Everything one successful weather request produces; the unit the cache
/// stores. Error responses never construct one, so `current` is not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    /// Display name for the search box: the provider's spelling once known,
    /// otherwise the user's input.
    pub input_city: String,
    /// At most five daily buckets, in order of first appearance.
    pub forecast: Vec<DailyForecast>,
}

/// One geocoding match returned by the autocomplete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitySuggestion {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}
