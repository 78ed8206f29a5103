//! Favorites list plus the most recent weather for it, observable by callers.

use anyhow::Result;
use tokio::sync::watch;

use crate::{FavoritesAggregator, FavoritesRegistry, Units, WeatherRecord};

/// Keeps the latest aggregated weather for the favorites in a watch slot.
///
/// Overlapping refreshes are allowed; whichever finishes last owns the slot.
#[derive(Debug)]
pub struct FavoritesFeed {
    registry: FavoritesRegistry,
    aggregator: FavoritesAggregator,
    latest: watch::Sender<Vec<WeatherRecord>>,
}

impl FavoritesFeed {
    pub fn new(registry: FavoritesRegistry, aggregator: FavoritesAggregator) -> Self {
        let (latest, _) = watch::channel(Vec::new());
        Self { registry, aggregator, latest }
    }

    pub fn registry(&self) -> &FavoritesRegistry {
        &self.registry
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<WeatherRecord>> {
        self.latest.subscribe()
    }

    pub fn current(&self) -> Vec<WeatherRecord> {
        self.latest.borrow().clone()
    }

    /// Reload weather for every favorite and publish the result.
    pub async fn refresh(&self, units: Units) -> Vec<WeatherRecord> {
        let cities = self.registry.list();
        let records = self.aggregator.load_all(&cities, units).await;

        self.latest.send_replace(records.clone());
        records
    }

    /// Drop the favorite at `index` and reload the rest.
    pub async fn remove_at(&self, index: usize, units: Units) -> Result<Vec<WeatherRecord>> {
        self.registry.remove_at(index)?;
        Ok(self.refresh(units).await)
    }

    /// Forget every favorite and publish an empty result right away.
    pub fn clear(&self) -> Result<()> {
        self.registry.clear()?;
        self.latest.send_replace(Vec::new());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prefs::MemoryStore, testing::FixtureClient};
    use std::sync::Arc;

    fn feed(client: FixtureClient) -> FavoritesFeed {
        let registry = FavoritesRegistry::new(Arc::new(MemoryStore::new()));
        FavoritesFeed::new(registry, FavoritesAggregator::new(Arc::new(client)))
    }

    fn sorted_names(records: &[WeatherRecord]) -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|r| r.city_name.clone()).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn refresh_publishes_to_subscribers() {
        let feed = feed(FixtureClient::new());
        feed.registry().add("Hanoi").unwrap();
        feed.registry().add("Hue").unwrap();

        let mut rx = feed.subscribe();
        feed.refresh(Units::Metric).await;

        rx.changed().await.unwrap();
        assert_eq!(sorted_names(&rx.borrow()), vec!["Hanoi", "Hue"]);
        assert_eq!(sorted_names(&feed.current()), vec!["Hanoi", "Hue"]);
    }

    #[tokio::test]
    async fn remove_reloads_remaining_cities() {
        let feed = feed(FixtureClient::new());
        feed.registry().add("Hanoi").unwrap();
        feed.registry().add("Hue").unwrap();

        let records = feed.remove_at(0, Units::Metric).await.unwrap();

        assert_eq!(sorted_names(&records), vec!["Hue"]);
        assert_eq!(feed.registry().list(), vec!["Hue"]);
    }

    #[tokio::test]
    async fn clear_publishes_empty_set() {
        let feed = feed(FixtureClient::new());
        feed.registry().add("Hanoi").unwrap();
        feed.refresh(Units::Metric).await;
        assert_eq!(feed.current().len(), 1);

        feed.clear().unwrap();

        assert!(feed.current().is_empty());
        assert!(feed.registry().list().is_empty());
    }

    #[tokio::test]
    async fn failing_favorite_is_not_published() {
        let feed = feed(FixtureClient::new().failing("Nowhere"));
        feed.registry().add("Nowhere").unwrap();
        feed.registry().add("Hue").unwrap();

        feed.refresh(Units::Metric).await;
        assert_eq!(sorted_names(&feed.current()), vec!["Hue"]);
    }
}
