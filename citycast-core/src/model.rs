use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Measurement system requested from the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Token sent as the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Units,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self { city: city.into(), units }
    }
}

/// Current conditions for one city.
///
/// `temperature` is in whatever unit the originating query asked for; the
/// record itself does not say which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city_name: String,
    pub temperature: f64,
    pub condition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
        assert_eq!(Units::try_from(" metric ").unwrap(), Units::Metric);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown units 'kelvin'"));
    }

    #[test]
    fn unknown_units_error_quotes_trimmed_token() {
        let err = Units::try_from("  kelvin ").unwrap_err();
        assert!(err.to_string().starts_with("Unknown units 'kelvin'."));
    }

    #[test]
    fn units_default_to_metric() {
        assert_eq!(Units::default(), Units::Metric);
        assert_eq!(Units::default().to_string(), "metric");
    }
}
