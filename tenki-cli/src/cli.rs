use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tenki_core::{
    Config, Coordinates, FixedLocation, IpLocator, LocationSource, LookupOutcome, NoLocation,
    Units, WeatherWidget, provider::provider_from_config,
};

use crate::{output, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tenki", version, about = "Weather lookup widget")]
pub struct Cli {
    /// Without a subcommand the interactive widget starts.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub location: LocationArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferred units.
    Configure,

    /// Show current weather for a city, e.g. "Paris" or "Paris,FR".
    Show {
        city: String,
    },

    /// Show current weather for the current location.
    Here,

    /// List city suggestions for a prefix.
    Suggest {
        prefix: String,
    },
}

/// Where the initial position comes from.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude to use instead of IP geolocation.
    #[arg(long, global = true, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of IP geolocation.
    #[arg(long, global = true, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Don't look up the current location at startup.
    #[arg(long, global = true, conflicts_with_all = ["lat", "lon"])]
    pub no_locate: bool,
}

impl LocationArgs {
    pub fn source(&self, config: &Config) -> Box<dyn LocationSource> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Box::new(FixedLocation(Coordinates::new(lat, lon))),
            _ if self.no_locate => Box::new(NoLocation),
            _ => Box::new(IpLocator::from_config(config)),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Some(command) = self.command else {
            let config = Config::load()?;
            let location = self.location.source(&config);
            let runtime = tokio::runtime::Handle::current();
            return tokio::task::spawn_blocking(move || session::run(config, location, runtime))
                .await
                .context("Interactive session panicked")?;
        };

        match command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?;
                let mut widget = widget_from_config(&config)?;
                widget.fetch_weather_by_city(&city).await;
                finish_lookup(&widget)
            }
            Command::Here => {
                let config = Config::load()?;
                let location = self.location.source(&config);
                let mut widget = widget_from_config(&config)?;
                if !widget.mount(location.as_ref()).await {
                    bail!("Could not determine the current location. Try `tenki show <city>` or --lat/--lon.");
                }
                finish_lookup(&widget)
            }
            Command::Suggest { prefix } => {
                let config = Config::load()?;
                let mut widget = widget_from_config(&config)?;
                widget.input(prefix).await;
                output::print_suggestions(&widget.state().suggestions);
                Ok(())
            }
        }
    }
}

pub type Widget = WeatherWidget<tenki_core::OpenWeatherClient>;

pub fn widget_from_config(config: &Config) -> anyhow::Result<Widget> {
    let client = provider_from_config(config)?;
    Ok(WeatherWidget::new(client).with_units(config.units))
}

/// Print the result of a one-shot lookup; a failed lookup is a failed command.
fn finish_lookup(widget: &Widget) -> anyhow::Result<()> {
    if let LookupOutcome::Failed(reason) = &widget.state().outcome {
        bail!("Weather lookup failed: {reason}");
    }
    output::print_view(&widget.view());
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.to_owned());

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec()).with_starting_cursor(start).prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
