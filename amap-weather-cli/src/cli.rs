use amap_weather_core::{
    AmapSource, Config, WeatherAdapter, declarations, provider::amap::DEFAULT_BASE_URL,
};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "amap-weather", version, about = "Weather by coordinate via the AMap API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct Location {
    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AMap API key (and optionally a custom base URL).
    Configure,

    /// Show live weather at a coordinate.
    Current {
        #[command(flatten)]
        location: Location,
    },

    /// Show the multi-day forecast at a coordinate.
    Forecast {
        #[command(flatten)]
        location: Location,
    },

    /// Print the tool declarations as JSON.
    Tools,

    /// Invoke a tool by name with JSON arguments, as an agent host would.
    Call {
        /// Tool name, e.g. "get_current_weather".
        name: String,

        /// Arguments object, e.g. '{"latitude":34.25,"longitude":108.95}'.
        args: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { location } => {
                let adapter = adapter()?;
                let text = adapter
                    .get_current_weather(location.lat, location.lon)
                    .await
                    .context("Failed to fetch current weather")?;
                println!("{text}");
                Ok(())
            }
            Command::Forecast { location } => {
                let adapter = adapter()?;
                let text = adapter
                    .get_forecast(location.lat, location.lon)
                    .await
                    .context("Failed to fetch forecast")?;
                println!("{text}");
                Ok(())
            }
            Command::Tools => {
                let json = serde_json::to_string_pretty(&declarations())
                    .context("Failed to serialize tool declarations")?;
                println!("{json}");
                Ok(())
            }
            Command::Call { name, args } => {
                let args: serde_json::Value =
                    serde_json::from_str(&args).context("Tool arguments must be valid JSON")?;
                let adapter = adapter()?;
                let text = adapter
                    .call_tool(&name, args)
                    .await
                    .with_context(|| format!("Tool '{name}' failed"))?;
                println!("{text}");
                Ok(())
            }
        }
    }
}

fn adapter() -> anyhow::Result<WeatherAdapter<AmapSource>> {
    let config = Config::load()?;
    WeatherAdapter::from_config(&config)
}

fn configure() -> anyhow::Result<()> {
    // Read the file only: a key coming from AMAP_API_KEY should not be persisted.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("AMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("Base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    let base_url = base_url.trim();
    config.amap.base_url = (!base_url.is_empty() && base_url != DEFAULT_BASE_URL)
        .then(|| base_url.to_string());

    config.save_to(&path)?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}
