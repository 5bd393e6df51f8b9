use thiserror::Error;

/// Failure classes for the weather flow.
///
/// The `Display` output of each variant is the exact user-facing message the
/// page renders; nothing structured ever reaches the browser.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please enter a city name or use 'Get My Location'.")]
    MissingLocation,

    #[error("Invalid API Key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Location not found or invalid. Please check input.")]
    LocationNotFound,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Error: {status} - {text}")]
    UpstreamStatus { status: u16, text: String },

    #[error("No response from weather server. Please check your internet connection.")]
    NoResponse(#[source] reqwest::Error),

    #[error("An unexpected error occurred while making the request.")]
    RequestSetup(#[source] reqwest::Error),

    #[error("Could not fetch weather data or forecast.")]
    MalformedResponse(#[source] serde_json::Error),
}

impl AppError {
    /// Classifies a non-success upstream status code.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::InvalidApiKey,
            404 => Self::LocationNotFound,
            429 => Self::RateLimited,
            code => Self::UpstreamStatus {
                status: code,
                text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            },
        }
    }

    /// Classifies a failure from `send()`: a request that could not even be
    /// built is a local fault, anything after dispatch counts as no response.
    pub fn from_send_error(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestSetup(err)
        } else {
            Self::NoResponse(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn known_statuses_map_to_fixed_messages() {
        assert!(matches!(
            AppError::from_status(StatusCode::UNAUTHORIZED),
            AppError::InvalidApiKey
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::NOT_FOUND),
            AppError::LocationNotFound
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::TOO_MANY_REQUESTS),
            AppError::RateLimited
        ));
    }

    #[test]
    fn other_statuses_carry_code_and_reason() {
        let err = AppError::from_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Error: 503 - Service Unavailable");
    }
}
