use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::DEFAULT_BASE_URL,
    error::FetchError,
    model::{WeatherQuery, WeatherRecord},
};

use super::WeatherClient;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn request_url(&self, query: &WeatherQuery) -> Result<Url, FetchError> {
        if query.city.trim().is_empty() {
            return Err(FetchError::InvalidRequest("city must not be empty".into()));
        }

        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", query.city.as_str()),
                ("units", query.units.as_str()),
                ("appid", self.api_key.as_str()),
            ],
        )
        .map_err(|e| FetchError::InvalidRequest(format!("{e} (base url '{}')", self.base_url)))
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        let url = self.request_url(query)?;
        debug!(city = %query.city, units = %query.units, "requesting current weather");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::transport)?;

        // The status is not inspected; an error body simply fails to decode.
        let status = res.status();
        let body = res.bytes().await.map_err(FetchError::transport)?;
        if body.is_empty() {
            debug!(%status, "empty response body");
            return Err(FetchError::EmptyResponse);
        }

        let parsed = decode_payload(&body)?;
        debug!(city = %parsed.city_name, temperature = parsed.temperature, "weather decoded");

        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(raw: OwCurrentResponse) -> Self {
        let condition = raw
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        WeatherRecord {
            city_name: raw.name,
            temperature: raw.main.temp,
            condition,
        }
    }
}

fn decode_payload(body: &[u8]) -> Result<WeatherRecord, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_slice(body)?;
    Ok(parsed.into())
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(query).await
    }
}
