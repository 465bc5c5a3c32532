mod listing;
mod persist;
mod products;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelfscout_core::{CrawlConfig, Deadline};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfscout")]
#[command(about = "Crawl a storefront search listing and its product pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand the search listing and write the listing table and URL list.
    Listing {
        /// Search results page to start from.
        #[arg(long)]
        url: Option<String>,
        /// Listing table output path.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Deduplicated product URL list output path.
        #[arg(long = "urls-out")]
        urls_out: Option<PathBuf>,
        /// Page snapshot written when no listing rows were extracted.
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        headless: bool,
    },
    /// Visit every URL in the list and write the product table.
    Products {
        /// Product URL list, one per line.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Product table output path.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        headless: bool,
    },
    /// Run the listing stage, then the product stage on its URL list.
    Run {
        #[arg(long)]
        headless: bool,
    },
}

/// Folds command-line overrides into the environment-derived config.
fn apply_overrides(config: &mut CrawlConfig, command: &Commands) {
    match command {
        Commands::Listing {
            url,
            out,
            urls_out,
            snapshot,
            headless,
        } => {
            if let Some(url) = url {
                config.search_url.clone_from(url);
            }
            if let Some(out) = out {
                config.listing_csv.clone_from(out);
            }
            if let Some(urls_out) = urls_out {
                config.urls_path.clone_from(urls_out);
            }
            if let Some(snapshot) = snapshot {
                config.snapshot_path.clone_from(snapshot);
            }
            config.headless |= *headless;
        }
        Commands::Products {
            input,
            out,
            headless,
        } => {
            if let Some(input) = input {
                config.urls_path.clone_from(input);
            }
            if let Some(out) = out {
                config.products_csv.clone_from(out);
            }
            config.headless |= *headless;
        }
        Commands::Run { headless } => config.headless |= *headless,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config =
        shelfscout_core::load_crawl_config().context("failed to load configuration")?;
    apply_overrides(&mut config, &cli.command);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let deadline = Deadline::after(config.run_deadline());
    match cli.command {
        Commands::Listing { .. } => {
            listing::run_listing(&config, &deadline).await?;
        }
        Commands::Products { .. } => {
            products::run_products(&config, &deadline).await?;
        }
        Commands::Run { .. } => {
            listing::run_listing(&config, &deadline).await?;
            products::run_products(&config, &deadline).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
