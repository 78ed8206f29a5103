//! In-process [`WeatherClient`] used by the unit tests.

use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::sync::Barrier;

use crate::{FetchError, Units, WeatherClient, WeatherQuery, WeatherRecord};

#[derive(Debug, Default)]
pub struct FixtureClient {
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, city: &str) -> Self {
        self.failing.insert(city.to_string());
        self
    }

    pub fn delayed(mut self, city: &str, millis: u64) -> Self {
        self.delays.insert(city.to_string(), Duration::from_millis(millis));
        self
    }

    /// Make every fetch wait until `n` fetches are in flight at once.
    pub fn rendezvous(mut self, n: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(n)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Temperature the fixture reports in `units`.
    pub fn temperature(units: Units) -> f64 {
        match units {
            Units::Metric => 20.0,
            Units::Imperial => 68.0,
        }
    }
}

#[async_trait]
impl WeatherClient for FixtureClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delays.get(&query.city) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&query.city) {
            return Err(FetchError::EmptyResponse);
        }

        Ok(WeatherRecord {
            city_name: query.city.clone(),
            temperature: Self::temperature(query.units),
            condition: "clear sky".to_string(),
        })
    }
}
