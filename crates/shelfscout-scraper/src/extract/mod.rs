//! Dual-strategy extraction: application-state probe and DOM selector read.

pub mod listing;
pub mod product;

pub use listing::{
    crawl_listing, extract_listing, listing_candidate_from_state, ListingCrawl,
    ListingExtraction, ListingSettings, LISTING_PRODUCTS_PATH, LISTING_STATE_SCRIPT,
};
pub use product::{
    crawl_products, product_candidate_from_state, scrape_product, ProductCrawl, ProductSettings,
    PRODUCT_STATE_SCRIPT,
};

use std::time::Duration;

use serde_json::Value;

use crate::error::ScraperError;
use crate::locator::Locator;
use crate::page::PageController;
use crate::selectors::CONSENT_BUTTON;

/// Clicks the consent / region banner if one becomes clickable within
/// `timeout`. Returns whether a banner was dismissed.
///
/// # Errors
///
/// Only non-recoverable page failures are returned; a missing banner is not
/// an error.
pub async fn dismiss_consent<P: PageController>(
    page: &P,
    timeout: Duration,
) -> Result<bool, ScraperError> {
    let consent = Locator::xpath(CONSENT_BUTTON);
    match page.click_when_ready(&consent, timeout).await {
        Ok(()) => {
            tracing::debug!("consent banner dismissed");
            Ok(true)
        }
        Err(err) if err.is_recoverable() => {
            tracing::debug!(error = %err, "no consent banner");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Evaluates an application-state probe. A failing script (missing global,
/// runtime error) reads as an empty tree so callers fall back to the DOM.
pub(crate) async fn probe_app_state<P: PageController>(
    page: &P,
    script: &str,
) -> Result<Value, ScraperError> {
    match page.evaluate_script(script).await {
        Ok(value) => Ok(value),
        Err(err) if err.is_recoverable() => {
            tracing::debug!(error = %err, "application state probe failed");
            Ok(Value::Null)
        }
        Err(err) => Err(err),
    }
}
