//! Core library for `citycast`.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather client abstraction and its OpenWeather implementation
//! - Favorite-city persistence on top of a key-value preference store
//! - Concurrent aggregation of weather for the whole favorites list
//!
//! It is used by `citycast-cli`, but can also be reused by other binaries or services.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod prefs;
pub mod registry;
pub mod settings;

#[cfg(test)]
mod testing;

pub use aggregator::{FavoritesAggregator, FavoritesReport};
pub use client::{WeatherClient, client_from_config, openweather::OpenWeatherClient};
pub use config::Config;
pub use error::FetchError;
pub use feed::FavoritesFeed;
pub use model::{Units, WeatherQuery, WeatherRecord};
pub use prefs::{FileStore, MemoryStore, PrefValue, PreferenceStore};
pub use registry::FavoritesRegistry;
pub use settings::Settings;
