use std::{path::PathBuf, time::Duration};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use weather_core::{AppConfig, Lookup, ProviderId, provider::providers_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Current weather for any place name")]
pub struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, global = true, env = "WEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment tag passed to the templates, e.g. "production".
    #[arg(long, global = true, env = "APP_ENV")]
    pub environment: Option<String>,

    #[arg(long, global = true, env = "HOST")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "PORT")]
    pub port: Option<u16>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server (default).
    Serve,

    /// Configure the endpoint of a specific provider.
    Configure {
        /// Provider short name, e.g. "nominatim" or "open-meteo".
        provider: String,
    },

    /// Print the current weather for a location.
    Show {
        /// Address or location name.
        location: String,
    },

    /// Look up several locations in a row and report which ones resolve.
    Check {
        #[arg(required = true)]
        locations: Vec<String>,

        /// Pause between lookups, in milliseconds.
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command {
            None | Some(Command::Serve) => weather_web::serve(config).await,
            Some(Command::Configure { ref provider }) => {
                let id = ProviderId::try_from(provider.as_str())?;
                self.configure(config, id)
            }
            Some(Command::Show { ref location }) => show(&config, location).await,
            Some(Command::Check {
                ref locations,
                delay_ms,
            }) => check(&config, locations, Duration::from_millis(delay_ms)).await,
        }
    }

    /// File first, then flags / environment variables on top.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };

        if let Some(environment) = &self.environment {
            config.environment = environment.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }

    fn configure(&self, mut config: AppConfig, id: ProviderId) -> anyhow::Result<()> {
        let current = config.provider_base_url(id).unwrap_or_default().to_string();

        let base_url = Text::new(&format!("Base URL for {id}:"))
            .with_default(&current)
            .prompt()
            .context("Failed to read base URL")?;
        config.upsert_provider_base_url(id, base_url.trim().to_string());

        if id == ProviderId::Nominatim {
            let agent = config.provider_user_agent(id).unwrap_or_default().to_string();
            let agent = Text::new("User-Agent sent to the geocoder:")
                .with_default(&agent)
                .with_help_message("Nominatim requires an agent identifying the application")
                .prompt()
                .context("Failed to read user agent")?;
            config.set_provider_user_agent(id, Some(agent.trim().to_string()));
        }

        let path = match &self.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save()?,
        };

        println!("Saved {id} settings to {}", path.display());
        Ok(())
    }
}

async fn show(config: &AppConfig, location: &str) -> anyhow::Result<()> {
    let providers = providers_from_config(config)?;
    let found = providers.lookup(location).await?;

    println!("{}", describe(&found));
    Ok(())
}

/// `<display name>: <temp><unit>, <condition>` plus the day's range when known.
fn describe(found: &Lookup) -> String {
    let weather = &found.weather;
    let unit = &weather.temperature.unit;
    let mut line = format!(
        "{}: {}{unit}, {}",
        found.location.display_name,
        weather.temperature.value,
        weather.condition()
    );
    if let (Some(low), Some(high)) = (weather.low_temp(), weather.high_temp()) {
        line.push_str(&format!(" (low {low}{unit}, high {high}{unit})"));
    }
    line
}

async fn check(config: &AppConfig, locations: &[String], delay: Duration) -> anyhow::Result<()> {
    let providers = providers_from_config(config)?;
    let total = locations.len();
    let mut failed = Vec::new();

    println!("Testing weather lookups for {total} locations...");

    for (i, location) in locations.iter().enumerate() {
        match providers.lookup(location).await {
            Ok(found) => println!(
                "✓ {location}: {}{}, {} - {}",
                found.weather.temperature.value,
                found.weather.temperature.unit,
                found.weather.condition(),
                found.location.display_name
            ),
            Err(e) => {
                println!("✗ {location}: {e}");
                failed.push(location.as_str());
            }
        }

        if i + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    let succeeded = total - failed.len();
    println!("\nResults: {succeeded} successful, {} failed", failed.len());

    if !check_passed(succeeded, total) {
        bail!("Only {succeeded} of {total} lookups succeeded; failed: {}", failed.join(", "));
    }

    Ok(())
}

/// More than 90% of the lookups have to succeed.
fn check_passed(succeeded: usize, total: usize) -> bool {
    succeeded * 10 > total * 9
}
