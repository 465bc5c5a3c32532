//! Listing stage: search page → listing table, URL list, and a snapshot when
//! nothing was extracted.

use anyhow::Context;
use shelfscout_core::{CrawlConfig, Deadline};
use shelfscout_scraper::{
    crawl_listing, AssembledListing, BrowserSession, ListingSettings, PageController,
    RecordAssembler, SessionOptions,
};

use crate::persist;

/// Runs the listing stage end to end. The browser session is closed on every
/// path before the result is returned.
///
/// A listing with zero rows is a successful run: the empty table is written
/// and a page snapshot is captured for diagnosis.
///
/// # Errors
///
/// Returns an error if the search URL is unusable, the browser cannot be
/// launched, the search page never renders, or an output file cannot be
/// written.
pub(crate) async fn run_listing(config: &CrawlConfig, deadline: &Deadline) -> anyhow::Result<()> {
    let settings = ListingSettings::from_config(config).context("invalid search URL")?;
    let mut session = BrowserSession::launch(SessionOptions::from_config(config))
        .await
        .context("failed to launch browser")?;

    let result = crawl_and_persist(&session, config, &settings, deadline).await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "browser session did not close cleanly");
    }
    result
}

async fn crawl_and_persist<P: PageController>(
    page: &P,
    config: &CrawlConfig,
    settings: &ListingSettings,
    deadline: &Deadline,
) -> anyhow::Result<()> {
    let crawl = crawl_listing(page, settings, deadline)
        .await
        .context("listing crawl failed")?;

    let mut assembler = RecordAssembler::new();
    assembler.extend(crawl.extraction.records);
    let listing = assembler.finish();

    let snapshot = if listing.needs_snapshot {
        match page.page_source().await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(error = %e, "could not capture page snapshot");
                None
            }
        }
    } else {
        None
    };

    persist_listing(config, &listing, snapshot.as_deref())
}

fn persist_listing(
    config: &CrawlConfig,
    listing: &AssembledListing,
    snapshot: Option<&str>,
) -> anyhow::Result<()> {
    persist::write_listing_table(&config.listing_csv, &listing.records)?;
    tracing::info!(
        rows = listing.records.len(),
        path = %config.listing_csv.display(),
        "wrote listing table"
    );

    if let Some(html) = snapshot {
        tracing::warn!(
            path = %config.snapshot_path.display(),
            "no listing rows extracted, writing page snapshot"
        );
        if let Err(e) = persist::write_snapshot(&config.snapshot_path, html) {
            tracing::warn!(error = %e, "could not write page snapshot");
        }
    }

    persist::write_url_list(&config.urls_path, &listing.urls)?;
    tracing::info!(
        urls = listing.urls.len(),
        path = %config.urls_path.display(),
        "wrote product URL list"
    );
    Ok(())
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
