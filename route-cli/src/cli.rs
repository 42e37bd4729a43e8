use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use route_core::{Config, Debouncer, NominatimGeocoder, ScreenController, ScreenState};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "route", version, about = "Route planner CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve two locations and fetch the driving route between them.
    Show {
        /// Start location: place name or "lat,lng".
        start: String,

        /// End location: place name or "lat,lng".
        end: String,

        /// Print the resulting screen state as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Look up autocomplete suggestions for a partial place name.
    Suggest {
        /// Partial place name, at least two characters.
        query: String,
    },

    /// Interactively edit the stored configuration.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { start, end, json } => show(start, end, json).await,
            Command::Suggest { query } => suggest(&query).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(start: String, end: String, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let controller = ScreenController::from_config(&config)?;

    let mut state = ScreenState {
        start_text: start,
        end_text: end,
        ..Default::default()
    };

    controller.show_route(&mut state).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render::summary(&state));
    }

    Ok(())
}

async fn suggest(query: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let geocoder = Arc::new(NominatimGeocoder::new(&config)?);
    let debouncer = Debouncer::new(geocoder, Duration::from_millis(config.debounce_ms));

    match debouncer.input_changed(query).await {
        Some(suggestions) if suggestions.is_empty() => {
            println!("No suggestions for {query:?} (queries need at least two characters)");
        }
        Some(suggestions) => {
            for suggestion in &suggestions {
                println!("{}", render::suggestion_line(suggestion));
            }
        }
        None => anyhow::bail!("Suggestion lookup failed"),
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()?;
    config.routing_url = Text::new("Routing endpoint:")
        .with_default(&config.routing_url)
        .prompt()?;
    config.user_agent = Text::new("User-Agent header:")
        .with_default(&config.user_agent)
        .prompt()?;
    config.country_codes = Text::new("Suggestion country codes:")
        .with_default(&config.country_codes)
        .prompt()?;
    config.language = Text::new("Suggestion language:")
        .with_default(&config.language)
        .prompt()?;
    config.debounce_ms = CustomType::<u64>::new("Suggestion debounce (ms):")
        .with_default(config.debounce_ms)
        .prompt()?;
    config.timeout_secs = CustomType::<u64>::new("Request timeout (s):")
        .with_default(config.timeout_secs)
        .prompt()?;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}
