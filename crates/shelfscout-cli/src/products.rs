//! Product stage: URL list → product table, one row per input URL.

use anyhow::Context;
use shelfscout_core::{CrawlConfig, Deadline};
use shelfscout_scraper::{crawl_products, BrowserSession, ProductSettings, SessionOptions};

use crate::persist;

/// Crawls every URL in the configured list and writes the product table.
///
/// Per-URL failures become placeholder rows; only setup and persistence
/// failures fail the stage. An empty or missing list writes a headers-only
/// table without launching a browser.
///
/// # Errors
///
/// Returns an error if the URL list cannot be read, the browser cannot be
/// launched, or the table cannot be written.
pub(crate) async fn run_products(config: &CrawlConfig, deadline: &Deadline) -> anyhow::Result<()> {
    let urls = persist::read_url_list(&config.urls_path)?;
    if urls.is_empty() {
        tracing::warn!(
            path = %config.urls_path.display(),
            "no product URLs to crawl, writing an empty product table"
        );
        persist::write_product_table(&config.products_csv, &[])?;
        return Ok(());
    }

    let settings = ProductSettings::from_config(config);
    let mut session = BrowserSession::launch(SessionOptions::from_config(config))
        .await
        .context("failed to launch browser")?;

    let crawl = crawl_products(&session, &urls, &settings, deadline).await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "browser session did not close cleanly");
    }

    persist::write_product_table(&config.products_csv, &crawl.records)?;
    tracing::info!(
        rows = crawl.records.len(),
        failed = crawl.failed,
        skipped = crawl.skipped,
        path = %config.products_csv.display(),
        "wrote product table"
    );
    Ok(())
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
