use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use common::errors::AppError;
use common::models::{CitySuggestion, CurrentWeather, WeatherReport};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api_client::OpenWeatherClient;
use crate::cache::{Location, WeatherCache};
use crate::forecast;
use crate::render::{self, PageView};

/// Results returned per suggestion query.
pub const SUGGESTION_LIMIT: u8 = 5;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenWeatherClient>,
    pub cache: Arc<WeatherCache>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-web" }))
}

/// Initial page: empty form, no results.
pub async fn index() -> Html<String> {
    Html(render::page(&PageView::default()))
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

/// Weather search: validate, consult the cache, and only on a miss fan out to
/// the two upstream endpoints. Every outcome renders the full page.
pub async fn submit(State(state): State<AppState>, Form(form): Form<WeatherForm>) -> Html<String> {
    let city_input = form.city.as_deref().unwrap_or("").trim().to_string();

    let Some(location) =
        Location::from_form(&city_input, form.lat.as_deref(), form.lon.as_deref())
    else {
        let message = AppError::MissingLocation.to_string();
        return Html(render::page(&PageView {
            report: None,
            error: Some(&message),
            input_city: "",
        }));
    };

    let key = location.cache_key();
    if let Some(report) = state.cache.get(&key).await {
        info!(key = %key, "Serving weather from cache");
        return Html(render::page(&PageView {
            report: Some(&report),
            error: None,
            input_city: &report.input_city,
        }));
    }

    // Provisional display name: the user's input for city searches, empty for
    // coordinate searches until the provider reports the resolved one.
    let mut display_city = match &location {
        Location::City(city) => city.clone(),
        Location::Coords { .. } => String::new(),
    };

    match fetch_report(&state.client, &location, &mut display_city).await {
        Ok(report) => {
            state.cache.put(key.clone(), report.clone()).await;
            info!(key = %key, city = %report.input_city, "Weather fetched and cached");
            Html(render::page(&PageView {
                report: Some(&report),
                error: None,
                input_city: &report.input_city,
            }))
        }
        Err(err) => {
            warn!(key = %key, error = %err, "Weather request failed");
            let message = err.to_string();
            Html(render::page(&PageView {
                report: None,
                error: Some(&message),
                input_city: &display_city,
            }))
        }
    }
}

/// Runs the two upstream calls in order and assembles the report. Nothing is
/// cached unless both succeed. `display_city` is corrected as soon as the
/// provider names the location, so a forecast failure still renders the
/// corrected name while a current-weather failure keeps the provisional one.
async fn fetch_report(
    client: &OpenWeatherClient,
    location: &Location,
    display_city: &mut String,
) -> Result<WeatherReport, AppError> {
    let current = client.current_weather(location).await?;
    let (icon, description) = current
        .weather
        .first()
        .map(|c| (c.icon.clone(), c.description.clone()))
        .unwrap_or_default();
    let weather = CurrentWeather {
        city: current.name.clone(),
        temp: current.main.temp,
        description,
        icon,
        humidity: current.main.humidity,
        wind_speed: current.wind.speed,
        feels_like: current.main.feels_like,
        timezone_offset: current.timezone,
    };
    *display_city = current.name;

    let forecast_response = client.forecast(location).await?;
    let daily = forecast::aggregate_daily(&forecast_response.list);

    Ok(WeatherReport {
        current: weather,
        input_city: display_city.clone(),
        forecast: daily,
    })
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/suggest-cities",
    params(
        ("q" = Option<String>, Query, description = "Partial city name, at least 2 characters")
    ),
    responses(
        (status = 200, description = "Matching cities, empty for short queries", body = [CitySuggestion]),
        (status = 500, description = "Upstream lookup failed")
    ),
    tag = "suggestions"
)]
pub async fn suggest_cities(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    if query.chars().count() < 2 {
        return Json(Vec::<CitySuggestion>::new()).into_response();
    }

    match state.client.search_cities(&query, SUGGESTION_LIMIT).await {
        Ok(results) => {
            let suggestions: Vec<CitySuggestion> = results
                .into_iter()
                .map(|r| CitySuggestion {
                    name: r.name,
                    state: r.state,
                    country: r.country,
                    lat: r.lat,
                    lon: r.lon,
                })
                .collect();
            Json(suggestions).into_response()
        }
        Err(err) => {
            // Operator detail stays in the log; the caller gets a fixed payload.
            error!(error = %err, "City suggestion lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Could not fetch city suggestions." })),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Sorry, that route doesn't exist!")
}
