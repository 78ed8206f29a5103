use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::prefs::{PrefValue, PreferenceStore, keys};

/// Ordered list of favorite city names kept in a [`PreferenceStore`].
///
/// Insertion order is display order. Every mutation is written to the store
/// before the call returns.
#[derive(Debug, Clone)]
pub struct FavoritesRegistry {
    store: Arc<dyn PreferenceStore>,
}

impl FavoritesRegistry {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<String> {
        self.store.string_list(keys::FAVORITE_CITIES).unwrap_or_default()
    }

    /// Append `city` unless an entry already matches it ignoring case.
    pub fn add(&self, city: &str) -> Result<()> {
        let mut cities = self.list();
        if cities.iter().any(|c| c.to_lowercase() == city.to_lowercase()) {
            debug!(city, "already a favorite");
            return Ok(());
        }

        cities.push(city.to_string());
        self.persist(cities)
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&self, index: usize) -> Result<()> {
        let mut cities = self.list();
        if index >= cities.len() {
            return Ok(());
        }

        cities.remove(index);
        self.persist(cities)
    }

    pub fn clear(&self) -> Result<()> {
        self.persist(Vec::new())
    }

    /// Remember `city` as the primary favorite and add it to the list.
    pub fn save_favorite_city(&self, city: &str) -> Result<()> {
        self.store
            .set(keys::FAVORITE_CITY, PrefValue::Text(city.to_string()))?;
        self.add(city)
    }

    pub fn favorite_city(&self) -> Option<String> {
        self.store.string(keys::FAVORITE_CITY)
    }

    fn persist(&self, cities: Vec<String>) -> Result<()> {
        debug!(count = cities.len(), "saving favorite cities");
        self.store.set(keys::FAVORITE_CITIES, PrefValue::List(cities))
    }
}
