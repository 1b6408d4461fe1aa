use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use skycast_core::{Config, FavoritesStore, OpenWeatherProvider, WeatherApp};

const SEARCH: &str = "Search for a city";
const FAVORITES: &str = "Open a favorite";
const ADD_FAVORITE: &str = "Add current city to favorites";
const REMOVE_FAVORITE: &str = "Remove current city from favorites";
const QUIT: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup with favorites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Interactive session: search cities and manage favorites.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut app = build_app()?;
                app.search(&city).await;
                render(&app);
                Ok(())
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn build_app() -> Result<WeatherApp> {
    let config = Config::load()?;
    let api_key = config.api_key()?.to_string();

    let provider = OpenWeatherProvider::new(api_key);
    let store = FavoritesStore::open().context("Failed to open favorites storage")?;

    Ok(WeatherApp::new(Box::new(provider), store))
}

async fn interactive() -> Result<()> {
    let mut app = build_app()?;

    loop {
        let mut actions = vec![SEARCH];
        if !app.favorites().is_empty() {
            actions.push(FAVORITES);
        }
        if let Some(snapshot) = app.snapshot() {
            if app.is_favorite(&snapshot.city) {
                actions.push(REMOVE_FAVORITE);
            } else {
                actions.push(ADD_FAVORITE);
            }
        }
        actions.push(QUIT);

        let choice = match Select::new("What next?", actions).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu choice"),
        };

        match choice {
            SEARCH => {
                let input = Text::new("City name:")
                    .prompt()
                    .context("Failed to read city name")?;
                let city = input.trim();
                if city.is_empty() {
                    continue;
                }

                app.set_query(city);
                app.search(city).await;
                render(&app);
            }
            FAVORITES => {
                let names: Vec<String> =
                    app.favorites().iter().map(|fav| fav.name.clone()).collect();
                let name = Select::new("Favorite locations:", names)
                    .prompt()
                    .context("Failed to read favorite choice")?;

                app.select_favorite(&name).await;
                render(&app);
            }
            ADD_FAVORITE | REMOVE_FAVORITE => {
                if let Some(city) = app.snapshot().map(|s| s.city.clone()) {
                    app.toggle_favorite(&city);
                }
            }
            _ => break,
        }
    }

    Ok(())
}

fn render(app: &WeatherApp) {
    if let Some(message) = app.error() {
        println!("{message}");
        return;
    }

    let Some(snapshot) = app.snapshot() else {
        return;
    };

    let marker = if app.is_favorite(&snapshot.city) {
        " [favorite]"
    } else {
        ""
    };
    println!("\n{}{marker}", snapshot.city);
    println!(
        "  {}°C  {}",
        snapshot.current.temperature_c, snapshot.current.description
    );
    println!(
        "  wind {} m/s  humidity {}%",
        snapshot.current.wind_speed_ms, snapshot.current.humidity_pct
    );
    println!("  {}", snapshot.current.icon_url());

    if !snapshot.forecast.is_empty() {
        println!("\n5-day forecast:");
        for day in &snapshot.forecast {
            println!(
                "  {:<12} {:>4}°C  {}",
                day.date, day.temperature_c, day.description
            );
        }
    }
    println!();
}
