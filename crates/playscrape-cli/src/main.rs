mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "playscrape")]
#[command(about = "Scrape app listings and detail pages from the storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full detail record for one app
    Details {
        /// App identifier, e.g. `com.facebook.orca`
        app_id: String,
    },
    /// List a collection, optionally within a category
    Collection {
        /// Collection name, e.g. `TOP_FREE`
        collection: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        results: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
        /// Age range for `FAMILY` categories (`FIVE_UNDER`, `SIX_EIGHT`, `NINE_UP`)
        #[arg(long)]
        age: Option<String>,
        /// Fetch every item's detail page instead of reading cards
        #[arg(long)]
        detailed: bool,
    },
    /// List a developer's apps
    Developer {
        developer: String,
        #[arg(long)]
        results: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        detailed: bool,
    },
    /// Search apps
    Search {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        detailed: bool,
    },
    /// List apps similar to an app
    Similar {
        app_id: String,
        #[arg(long)]
        results: Option<u32>,
        #[arg(long)]
        detailed: bool,
    },
    /// Autocomplete suggestions for a partial query
    Suggestions { query: String },
    /// Category ids from the storefront menu
    Categories {
        /// Keep promotional menu entries that are not categories
        #[arg(long)]
        include_promotions: bool,
    },
    /// Resolve many app ids to detail records concurrently
    Resolve {
        #[arg(required = true)]
        app_ids: Vec<String>,
        /// Overrides `PLAYSCRAPE_CONCURRENT_REQUESTS`
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = playscrape_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let output = commands::run(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
