use anyhow::Result;
use std::sync::Arc;

use crate::{
    model::Units,
    prefs::{PrefValue, PreferenceStore, keys},
};

/// User settings stored alongside the favorites.
///
/// Unset flags fall back to: dark theme off, metric units on, notifications on.
#[derive(Debug, Clone)]
pub struct Settings {
    store: Arc<dyn PreferenceStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn dark_theme(&self) -> bool {
        self.store.flag(keys::DARK_THEME).unwrap_or(false)
    }

    pub fn set_dark_theme(&self, enabled: bool) -> Result<()> {
        self.store.set(keys::DARK_THEME, PrefValue::Flag(enabled))
    }

    pub fn metric_units(&self) -> bool {
        self.store.flag(keys::METRIC_UNITS).unwrap_or(true)
    }

    pub fn set_metric_units(&self, enabled: bool) -> Result<()> {
        self.store.set(keys::METRIC_UNITS, PrefValue::Flag(enabled))
    }

    pub fn notifications_enabled(&self) -> bool {
        self.store.flag(keys::NOTIFICATIONS_ENABLED).unwrap_or(true)
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.store.set(keys::NOTIFICATIONS_ENABLED, PrefValue::Flag(enabled))
    }

    pub fn units(&self) -> Units {
        if self.metric_units() { Units::Metric } else { Units::Imperial }
    }

    /// Forget the primary favorite and the whole favorites list.
    pub fn clear_saved_data(&self) -> Result<()> {
        self.store.remove(keys::FAVORITE_CITY)?;
        self.store.remove(keys::FAVORITE_CITIES)
    }
}
