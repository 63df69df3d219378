use std::{io::Write, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use tracing::info;
use weather_widget_core::{Config, SearchState, WeatherSource, fetcher::source_from_config, render};

use crate::event_loop;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Look up current weather for a city")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Overrides for values otherwise read from the config file.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// OpenWeather API key.
    #[arg(long, global = true, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenWeather base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeather API key in the config file.
    Configure,

    /// Look up one city and print the result.
    Show {
        /// City name; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Read city names from stdin, one per line, until EOF or `:q`.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let source = build_source(&self.connection)?;

                let mut state = SearchState::new();
                state.set_city_text(city.join(" "));
                state.submit_with(source.as_ref()).await;

                let mut stdout = std::io::stdout().lock();
                write!(stdout, "{}", render(&state)).context("Failed to write to stdout")?;
                Ok(())
            }
            Command::Interactive => {
                let source: Arc<dyn WeatherSource> = Arc::from(build_source(&self.connection)?);
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();

                event_loop::run(source, stdin, &mut stdout).await
            }
        }
    }
}

fn build_source(args: &ConnectionArgs) -> anyhow::Result<Box<dyn WeatherSource>> {
    let config = apply_overrides(Config::load()?, args);
    source_from_config(&config, args.api_key.as_deref())
}

fn apply_overrides(mut config: Config, args: &ConnectionArgs) -> Config {
    if let Some(base_url) = &args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = Some(timeout_secs);
    }
    config
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if config.api_key.is_some() {
        let overwrite = Confirm::new("An API key is already stored. Replace it?")
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;

        if !overwrite {
            println!("Keeping the existing API key.");
            return Ok(());
        }
    }

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    info!(path = %path.display(), "stored API key");
    println!("Saved API key to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-widget"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["weather-widget", "show", "New", "York"]).expect("parse");
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city.join(" "), "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["weather-widget", "show"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "weather-widget",
            "show",
            "Oslo",
            "--base-url",
            "http://localhost:9000",
            "--timeout-secs",
            "3",
        ])
        .expect("parse");

        assert_eq!(cli.connection.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.connection.timeout_secs, Some(3));
    }

    #[test]
    fn overrides_replace_file_values() {
        let file = Config {
            api_key: Some("FILE".into()),
            base_url: Some("http://file".into()),
            timeout_secs: Some(30),
        };
        let args = ConnectionArgs {
            api_key: None,
            base_url: Some("http://flag".into()),
            timeout_secs: None,
        };

        let merged = apply_overrides(file, &args);
        assert_eq!(merged.base_url.as_deref(), Some("http://flag"));
        assert_eq!(merged.timeout_secs, Some(30));
        assert_eq!(merged.api_key.as_deref(), Some("FILE"));
    }
}
