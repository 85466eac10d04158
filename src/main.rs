use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use anitaku::config::{self, Config};
use anitaku::{AnitakuClient, Filter, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search titles by name
    Search {
        query: String,
        /// ONGOING, UPCOMING or COMPLETED; repeatable. Unknown names are ignored.
        #[arg(short, long = "filter")]
        filters: Vec<String>,
    },
    /// Print a title's airing status
    Status { anime: String },
    /// Check whether an episode-zero page exists
    EpisodeZero { path: String },
    /// Print the newest episode number of a title
    LatestEpisode { anime: String },
}

fn log_dir() -> Result<PathBuf> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("anitaku={level},reqwest=warn,hyper=warn")));

    let file_layer = match log_dir() {
        Ok(dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, "anitaku.log"))
                .with_ansi(false),
        ),
        Err(e) => {
            eprintln!("Warning: Could not set up log file: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    info!(base_url = %config.site.base_url, "Loaded config");

    let client = AnitakuClient::with_config(&config)?;

    match args.command {
        Command::Search { query, filters } => {
            let filters = (!filters.is_empty()).then(|| Filter::parse_names(&filters));
            let results = client.search(&query, filters.as_deref()).await?;
            info!(count = results.len(), "Search finished");
            print_json(&results)?;
        }
        Command::Status { anime } => {
            print_json(&client.get_status(&anime).await?)?;
        }
        Command::EpisodeZero { path } => {
            print_json(&client.has_episode_zero(&path).await?)?;
        }
        Command::LatestEpisode { anime } => {
            print_json(&client.get_new_episode(&anime).await?)?;
        }
    }

    client.close();
    Ok(())
}
