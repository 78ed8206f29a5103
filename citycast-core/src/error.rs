//! Failure kinds of a single-city weather fetch.

use thiserror::Error;

/// Every way [`WeatherClient::fetch`](crate::WeatherClient::fetch) can fail.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("No data received")]
    EmptyResponse,

    #[error("Failed to decode weather data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Wrap a reqwest error, dropping the request URL since it carries the API key.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }

    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Transport(_) => "transport",
            Self::EmptyResponse => "empty_response",
            Self::Decode(_) => "decode",
        }
    }
}
