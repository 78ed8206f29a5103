use std::sync::Arc;

use anyhow::Context;
use citycast_core::{
    Config, FavoritesAggregator, FavoritesFeed, FavoritesRegistry, FileStore, PreferenceStore,
    Settings, Units, WeatherQuery, WeatherRecord, client_from_config,
};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::Password;
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather for your favorite cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure {
        /// Key to store; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show current weather for a city.
    Show {
        city: String,

        /// "metric" or "imperial"; defaults to the metric-units setting.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Show or change settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorites with their indices.
    List,
    /// Add a city (ignored if already present, case-insensitively).
    Add { city: String },
    /// Remove the favorite at an index shown by `list`.
    Remove { index: usize },
    /// Remove every favorite.
    Clear,
    /// Fetch current weather for every favorite at once.
    Weather {
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set {
        key: SettingKey,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Forget the saved favorites.
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SettingKey {
    DarkTheme,
    MetricUnits,
    Notifications,
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

fn open_file_store() -> anyhow::Result<FileStore> {
    FileStore::open_default().context("Failed to open preferences")
}

fn open_store() -> anyhow::Result<Arc<dyn PreferenceStore>> {
    Ok(Arc::new(open_file_store()?))
}

fn print_record(record: &WeatherRecord, units: Units) {
    let symbol = units.temperature_symbol();
    if record.condition.is_empty() {
        println!("{}: {:.1}{symbol}", record.city_name, record.temperature);
    } else {
        println!(
            "{}: {:.1}{symbol}, {}",
            record.city_name, record.temperature, record.condition
        );
    }
}

fn print_favorites(registry: &FavoritesRegistry) {
    let cities = registry.list();
    if cities.is_empty() {
        println!("No favorite cities saved.");
        return;
    }
    for (index, city) in cities.iter().enumerate() {
        println!("[{index}] {city}");
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { city, units } => show(city, units).await,
            Command::Favorites { action } => favorites(action).await,
            Command::Settings { action } => settings(action),
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    let mut config = Config::load()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: String, units: Option<Units>) -> anyhow::Result<()> {
    let store = open_store()?;
    let units = units.unwrap_or_else(|| Settings::new(store).units());

    let client = client_from_config(&Config::load()?)?;
    debug!(%city, %units, "single city lookup");
    let record = client.fetch(&WeatherQuery::new(city, units)).await?;

    print_record(&record, units);
    Ok(())
}

async fn favorites(action: FavoritesCommand) -> anyhow::Result<()> {
    let store = open_store()?;
    let registry = FavoritesRegistry::new(store.clone());

    match action {
        FavoritesCommand::List => print_favorites(&registry),
        FavoritesCommand::Add { city } => {
            registry.add(city.trim())?;
            print_favorites(&registry);
        }
        FavoritesCommand::Remove { index } => {
            registry.remove_at(index)?;
            print_favorites(&registry);
        }
        FavoritesCommand::Clear => {
            registry.clear()?;
            println!("Cleared favorite cities.");
        }
        FavoritesCommand::Weather { units } => {
            let units = units.unwrap_or_else(|| Settings::new(store).units());
            let client = client_from_config(&Config::load()?)?;
            let feed = FavoritesFeed::new(registry, FavoritesAggregator::new(Arc::from(client)));

            let records = feed.refresh(units).await;
            if records.is_empty() {
                println!("No weather available for favorite cities.");
            }
            for record in &records {
                print_record(record, units);
            }
        }
    }

    Ok(())
}

fn settings(action: SettingsCommand) -> anyhow::Result<()> {
    let store = open_file_store()?;
    let path = store.path().to_path_buf();
    let settings = Settings::new(Arc::new(store));

    match action {
        SettingsCommand::Show => {
            println!("dark-theme:    {}", settings.dark_theme());
            println!("metric-units:  {}", settings.metric_units());
            println!("notifications: {}", settings.notifications_enabled());
            println!("stored in:     {}", path.display());
        }
        SettingsCommand::Set { key, value } => match key {
            SettingKey::DarkTheme => settings.set_dark_theme(value)?,
            SettingKey::MetricUnits => settings.set_metric_units(value)?,
            SettingKey::Notifications => settings.set_notifications_enabled(value)?,
        },
        SettingsCommand::Reset => {
            settings.clear_saved_data()?;
            println!("Cleared saved favorites.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_favorites_remove() {
        let cli = Cli::try_parse_from(["citycast", "favorites", "remove", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Favorites { action: FavoritesCommand::Remove { index: 2 } }
        ));
    }

    #[test]
    fn parses_units_flag() {
        let cli =
            Cli::try_parse_from(["citycast", "show", "Buenos Aires", "--units", "imperial"])
                .unwrap();
        match cli.command {
            Command::Show { city, units } => {
                assert_eq!(city, "Buenos Aires");
                assert_eq!(units, Some(Units::Imperial));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_units() {
        let err = Cli::try_parse_from(["citycast", "show", "Lima", "--units", "kelvin"]);
        assert!(err.is_err());
    }

    #[test]
    fn parses_setting_key() {
        let cli =
            Cli::try_parse_from(["citycast", "settings", "set", "metric-units", "false"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settings {
                action: SettingsCommand::Set { key: SettingKey::MetricUnits, value: false }
            }
        ));
    }
}
