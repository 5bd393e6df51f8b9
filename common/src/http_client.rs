use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// JSON fetch wrapper that classifies every failure into an [`AppError`].
///
/// Exactly one attempt per call: the weather flow never retries, a classified
/// error goes straight back to the page. The send timeout bounds how long a
/// hung upstream can hold a request and surfaces as the no-response class.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(AppError::from_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::from_status(status));
        }

        let text = response.text().await.map_err(AppError::NoResponse)?;
        debug!(bytes = text.len(), "Upstream response received");
        serde_json::from_str(&text).map_err(AppError::MalformedResponse)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(10)
    }
}
