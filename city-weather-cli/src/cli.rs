use anyhow::Context;
use city_weather_core::{Config, InfoScreen, WeatherController, provider_from_config};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "city-weather", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, passed to the provider as typed.
        city: String,
    },

    /// Show the info screen.
    Info {
        /// Open every section.
        #[arg(long)]
        expand: bool,
    },

    /// Look up cities one after another.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let ctl = controller()?;
                ctl.set_city(city);
                println!("{}", render::LOADING);
                ctl.submit().await;
                println!("{}", render::weather(&ctl.state()));
                Ok(())
            }
            Command::Info { expand } => {
                let mut screen = InfoScreen::default();
                if expand {
                    screen.expand_all();
                }
                println!("{}", render::info(&screen));
                Ok(())
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn controller() -> anyhow::Result<WeatherController> {
    let config = Config::load()?;
    let provider = provider_from_config(&config);
    Ok(WeatherController::new(provider, config.controller_options()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved API key to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

const HELP: &str = "Enter a city to look it up. Commands: :r refresh, :i info (:i <n> toggles section n), :q quit.";

/// One line typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Refresh,
    ExpandInfo,
    /// Zero-based section index.
    ToggleInfo(usize),
    Help,
    Lookup(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            ":q" => Input::Quit,
            ":r" => Input::Refresh,
            ":i" => Input::ExpandInfo,
            cmd if cmd.starts_with(':') => match cmd.strip_prefix(":i ") {
                Some(n) => n
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .map_or(Input::Help, Input::ToggleInfo),
                None => Input::Help,
            },
            // Cities go to the provider as typed.
            _ => Input::Lookup(line.to_string()),
        }
    }
}

async fn interactive() -> anyhow::Result<()> {
    let ctl = controller()?;
    let mut info = InfoScreen::default();
    println!("{HELP}");

    loop {
        let city = ctl.city();
        let line = match Text::new("City:").with_initial_value(&city).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        match Input::parse(&line) {
            Input::Quit => break,
            Input::Help => {
                println!("{HELP}\n");
                continue;
            }
            Input::ExpandInfo => {
                info.expand_all();
                println!("{}\n", render::info(&info));
                continue;
            }
            Input::ToggleInfo(index) => {
                info.toggle(index);
                println!("{}\n", render::info(&info));
                continue;
            }
            Input::Refresh => {
                println!("{}", render::LOADING);
                ctl.refresh().await;
            }
            Input::Lookup(city) => {
                ctl.set_city(city);
                println!("{}", render::LOADING);
                ctl.submit().await;
            }
        }

        println!("{}\n", render::weather(&ctl.state()));
    }

    ctl.detach();
    Ok(())
}
