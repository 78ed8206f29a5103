//! Concurrent weather lookup for the whole favorites list.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::{FetchError, Units, WeatherClient, WeatherQuery, WeatherRecord};

/// Outcome of one aggregate load, split by city.
#[derive(Debug, Default)]
pub struct FavoritesReport {
    /// Records in the order their fetches completed.
    pub succeeded: Vec<WeatherRecord>,
    pub failed: Vec<(String, FetchError)>,
}

#[derive(Debug, Clone)]
pub struct FavoritesAggregator {
    client: Arc<dyn WeatherClient>,
}

impl FavoritesAggregator {
    pub fn new(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Fetch every city at once and return the records that loaded.
    ///
    /// Failed cities are left out; this never fails as a whole. The result is
    /// in completion order, not input order.
    pub async fn load_all(&self, cities: &[String], units: Units) -> Vec<WeatherRecord> {
        self.load_report(cities, units).await.succeeded
    }

    /// Like [`load_all`](Self::load_all) but also returns the per-city failures.
    pub async fn load_report(&self, cities: &[String], units: Units) -> FavoritesReport {
        let mut join_set = JoinSet::new();

        for city in cities {
            let client = Arc::clone(&self.client);
            let query = WeatherQuery::new(city.clone(), units);

            join_set.spawn(async move {
                let result = client.fetch(&query).await;
                (query.city, result)
            });
        }

        let mut report = FavoritesReport::default();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((_, Ok(record))) => report.succeeded.push(record),
                Ok((city, Err(err))) => {
                    warn!(%city, kind = err.kind(), error = %err, "favorite city failed to load");
                    report.failed.push((city, err));
                }
                Err(err) => warn!(error = %err, "favorite fetch task aborted"),
            }
        }

        info!(
            requested = cities.len(),
            loaded = report.succeeded.len(),
            failed = report.failed.len(),
            "favorites loaded"
        );

        report
    }
}
