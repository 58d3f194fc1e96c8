use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::Select;
use uweather_core::{
    GeocodingResult, JsonFileBackend, LocationStore, OpenMeteoProvider, Settings, config,
};

use crate::commands::Commands;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "uweather", version, about = "Weather in your terminal, powered by Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Saved label or city name. Omit to use the default location.
    pub target: Option<String>,

    /// Number of forecast days (1-7). 1 shows current conditions.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Directory holding locations.json and config.toml (default: ~/.uweather).
    #[arg(long, global = true, env = "UWEATHER_HOME")]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a city and save it under a label.
    Add {
        /// City name, e.g. "Istanbul".
        city: String,

        /// Label to save the location under.
        #[arg(long)]
        label: Option<String>,

        /// Pick interactively when the city name is ambiguous.
        #[arg(long)]
        choose: bool,
    },

    /// Remove a saved location.
    Remove { label: String },

    /// List saved locations.
    #[command(visible_aliases = ["list", "ls"])]
    Locations,

    /// Set the default location.
    Default { label: String },
}

fn pick_candidate(candidates: Vec<GeocodingResult>) -> anyhow::Result<GeocodingResult> {
    Select::new("Which place did you mean?", candidates)
        .prompt()
        .context("No location selected")
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli {
            command,
            target,
            days,
            config_dir,
            ..
        } = self;

        let dir = match config_dir {
            Some(dir) => dir,
            None => config::default_config_dir()?,
        };
        config::ensure_dir(&dir)?;

        let settings = Settings::load(&dir)?;
        let days = days.unwrap_or(settings.default_days);

        let provider = OpenMeteoProvider::from_settings(&settings);
        let store = LocationStore::new(JsonFileBackend::in_dir(&dir));
        let commands = Commands::new(&provider, &store);

        let mut out = std::io::stdout().lock();

        match command {
            Some(Command::Add {
                city,
                label,
                choose,
            }) => {
                if choose {
                    commands
                        .add_choosing(&city, label.as_deref(), pick_candidate, &mut out)
                        .await
                } else {
                    commands.add(&city, label.as_deref(), &mut out).await
                }
            }
            Some(Command::Remove { label }) => commands.remove(Some(&label), &mut out),
            Some(Command::Locations) => commands.list(&mut out),
            Some(Command::Default { label }) => commands.set_default(Some(&label), &mut out),
            None => match target {
                None => commands.show_weather(None, days, &mut out).await,
                Some(label) if store.contains(&label)? => {
                    commands.show_weather(Some(&label), days, &mut out).await
                }
                Some(city) => commands.show_weather_by_city(&city, days, &mut out).await,
            },
        }
    }
}
