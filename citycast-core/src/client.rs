use crate::{Config, FetchError, WeatherQuery, WeatherRecord, client::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a single city.
///
/// The HTTP implementation is [`OpenWeatherClient`]; tests plug in fixtures.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError>;
}

/// Construct the OpenWeather client from config (API key and base URL).
pub fn client_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherClient>> {
    let api_key = config.api_key()?;
    let client = OpenWeatherClient::with_base_url(api_key, config.base_url());

    Ok(Box::new(client))
}
