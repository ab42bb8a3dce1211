use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::places::{Client, Search};

mod harvest;
mod locations;
mod output;
mod places;
mod utils;

/// Collects basketball courts around Singapore from the Google Places nearby
/// search and saves them as CSV.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(long, default_value = "basketball_courts.csv")]
    output: PathBuf,
    #[arg(long, default_value = places::KEYWORD)]
    keyword: String,
    /// Search radius around each location, in metres
    #[arg(long, default_value_t = places::RADIUS)]
    radius: u32,
    /// Seconds to wait before asking for the next page
    #[arg(long, default_value_t = places::PAGE_DELAY.as_secs())]
    page_delay: u64,
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let search = Search {
        radius: cli.radius,
        keyword: cli.keyword,
        page_delay: Duration::from_secs(cli.page_delay),
    };
    let client = Client::new(cli.api_key);

    let locations = locations::all();
    let pb = utils::progress_bar(locations.len() as u64);
    let harvest = harvest::collect(&client, &search, &locations, &pb);
    pb.finish_and_clear();

    let fetched = harvest.places.len();
    let written = output::save(harvest.places, &cli.output)
        .with_context(|| format!("Failed to save {}", cli.output.display()))?;
    info!(fetched, written, failed = harvest.failed, "done");

    println!("Data successfully saved to {}", cli.output.display());
    Ok(())
}
