pub mod api_client;
pub mod cache;
pub mod config;
pub mod forecast;
pub mod handlers;
mod openapi;
pub mod render;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Builds the full application router over an injected state, so tests can
/// drive it against a stub provider.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/health", get(handlers::health))
        .route("/api/suggest-cities", get(handlers::suggest_cities))
        .merge(openapi::swagger_ui())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
