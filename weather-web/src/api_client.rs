use common::errors::AppError;
use common::http_client::HttpClient;
use serde::Deserialize;
use tracing::instrument;

use crate::cache::Location;

/// Provider current-weather response, limited to the fields the page shows.
/// Optional blocks default so a sparse payload degrades to empty fields
/// instead of an undecodable one.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

/// One 3-hourly forecast entry.
#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    /// UNIX timestamp of the sample, seconds.
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// OpenWeatherMap client covering the three endpoints the app uses.
///
/// Base URLs are injected so tests can point it at a stub server. All weather
/// calls request metric units. There is no retry and no per-call caching here;
/// the handler layer owns the cache.
pub struct OpenWeatherClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
    geo_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String, geo_url: String) -> Self {
        Self {
            http: HttpClient::default(),
            api_key,
            base_url,
            geo_url,
        }
    }

    #[instrument(skip(self))]
    pub async fn current_weather(
        &self,
        location: &Location,
    ) -> Result<CurrentWeatherResponse, AppError> {
        let url = format!("{}/weather", self.base_url);
        self.http.get_json(&url, &self.location_params(location)).await
    }

    #[instrument(skip(self))]
    pub async fn forecast(&self, location: &Location) -> Result<ForecastResponse, AppError> {
        let url = format!("{}/forecast", self.base_url);
        self.http.get_json(&url, &self.location_params(location)).await
    }

    /// Free-text city search against the geocoding endpoint, capped by the
    /// caller.
    #[instrument(skip(self))]
    pub async fn search_cities(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeResult>, AppError> {
        let url = format!("{}/direct", self.geo_url);
        let limit = limit.to_string();
        let params = [
            ("q", query),
            ("limit", limit.as_str()),
            ("appid", self.api_key.as_str()),
        ];
        self.http.get_json(&url, &params).await
    }

    fn location_params<'a>(&'a self, location: &'a Location) -> Vec<(&'a str, &'a str)> {
        let mut params = match location {
            Location::City(city) => vec![("q", city.as_str())],
            Location::Coords { lat, lon } => {
                vec![("lat", lat.as_str()), ("lon", lon.as_str())]
            }
        };
        params.push(("appid", self.api_key.as_str()));
        params.push(("units", "metric"));
        params
    }
}
