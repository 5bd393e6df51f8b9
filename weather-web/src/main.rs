use common::tracing::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use weather_web::api_client::OpenWeatherClient;
use weather_web::cache::WeatherCache;
use weather_web::config::Config;
use weather_web::{AppState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::from_env();
    if config.api_key.is_empty() {
        warn!("WEATHER_API_KEY is not set; upstream calls will be rejected");
    }

    let cache = Arc::new(WeatherCache::with_ttl(config.cache_ttl_seconds));
    let client = Arc::new(OpenWeatherClient::new(
        config.api_key.clone(),
        config.openweather_base_url.clone(),
        config.geocoding_base_url.clone(),
    ));

    let app = router(AppState { client, cache });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("weather-web starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("weather-web stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
