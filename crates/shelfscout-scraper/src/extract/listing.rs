//! Listing-page extraction: one candidate per result item.
//!
//! The DOM pass runs per item. If it yields nothing while the application
//! state holds a non-empty products collection, the whole listing switches
//! to records built from application state. The decision is global: records
//! from the two strategies are never mixed in one listing.

use std::time::Duration;

use serde_json::Value;
use shelfscout_core::{CrawlConfig, Deadline, ListingRecord};

use crate::candidate::{CandidateOrigin, ExtractionCandidate};
use crate::dom::{has_digit, has_rating, non_blank, read_field, read_href};
use crate::error::ScraperError;
use crate::expand::{expand_listing, ExpansionReport, ExpansionSettings};
use crate::locator::Locator;
use crate::page::{poll_until, PageController};
use crate::selectors::{listing, with_prefix, LISTING_ITEM, MAIN_CONTENT};
use crate::state::{array_at, first_scalar, lookup, RawValue};
use crate::urls::SiteRoot;

use super::{dismiss_consent, probe_app_state};

/// Returns the search slice of the client-rendering state, or `null`.
pub const LISTING_STATE_SCRIPT: &str = r"(() => {
  const s = window.AppEventData && window.AppEventData.computedState && window.AppEventData.computedState.state;
  return s && s.search ? { search: s.search } : null;
})()";

/// Where the products collection lives inside [`LISTING_STATE_SCRIPT`]'s result.
pub const LISTING_PRODUCTS_PATH: &[&str] = &["search", "searchResult", "products"];

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub search_url: String,
    pub site: SiteRoot,
    pub nav_timeout: Duration,
    pub consent_timeout: Duration,
    pub app_state_timeout: Duration,
    pub expansion: ExpansionSettings,
}

impl ListingSettings {
    /// # Errors
    ///
    /// [`ScraperError::InvalidSiteUrl`] when the configured search URL has no
    /// usable origin.
    pub fn from_config(config: &CrawlConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            search_url: config.search_url.clone(),
            site: SiteRoot::from_search_url(&config.search_url, &config.path_prefix)?,
            nav_timeout: config.nav_timeout(),
            consent_timeout: config.consent_timeout(),
            app_state_timeout: config.app_state_timeout(),
            expansion: ExpansionSettings::from_config(config),
        })
    }
}

/// Result of the extraction pass over an expanded listing.
#[derive(Debug, Clone)]
pub struct ListingExtraction {
    pub records: Vec<ListingRecord>,
    /// Strategy the records came from.
    pub source: CandidateOrigin,
    pub dom_containers: usize,
    pub app_state_products: usize,
}

/// Everything the listing stage learned from one search page.
#[derive(Debug, Clone)]
pub struct ListingCrawl {
    pub expansion: ExpansionReport,
    pub extraction: ListingExtraction,
}

/// Loads the search page, expands it fully and extracts every item.
///
/// # Errors
///
/// [`ScraperError::Navigation`] when the search page never renders its main
/// content: there is no listing to work on. Other non-recoverable page
/// failures are returned as-is.
pub async fn crawl_listing<P: PageController>(
    page: &P,
    settings: &ListingSettings,
    deadline: &Deadline,
) -> Result<ListingCrawl, ScraperError> {
    tracing::info!(url = %settings.search_url, "opening search page");
    page.navigate(
        &settings.search_url,
        &Locator::xpath(MAIN_CONTENT),
        settings.nav_timeout,
    )
    .await?;
    dismiss_consent(page, deadline.cap(settings.consent_timeout)).await?;

    let expansion = expand_listing(page, &settings.expansion, deadline).await?;
    let extraction = extract_listing(page, settings, deadline).await?;
    Ok(ListingCrawl {
        expansion,
        extraction,
    })
}

/// Extracts records from the current (already expanded) listing page.
///
/// # Errors
///
/// Only non-recoverable page failures are returned.
pub async fn extract_listing<P: PageController>(
    page: &P,
    settings: &ListingSettings,
    deadline: &Deadline,
) -> Result<ListingExtraction, ScraperError> {
    let items = Locator::xpath(LISTING_ITEM);
    let dom_containers = page.count(&items).await?;
    tracing::info!(dom_containers, "found listing containers");

    let state = wait_for_app_state(page, deadline.cap(settings.app_state_timeout)).await?;
    let app_products = array_at(&state, LISTING_PRODUCTS_PATH);
    tracing::info!(app_state_products = app_products.len(), "read application state");

    let anchors: Vec<String> = listing::URL_TEMPLATES
        .iter()
        .map(|template| with_prefix(template, &settings.site.path_prefix))
        .collect();

    let mut records = Vec::new();
    for index in 1..=dom_containers {
        let item = items.nth(index);
        let candidate = dom_candidate(page, &item, &anchors, &settings.site).await?;
        if candidate.has_identity() {
            records.push(candidate.into_listing_record());
        } else {
            tracing::debug!(index, "skipping listing item without a name");
        }
    }

    let mut source = CandidateOrigin::Dom;
    if records.is_empty() && !app_products.is_empty() {
        tracing::info!(
            app_state_products = app_products.len(),
            "DOM pass found nothing, using application state"
        );
        source = CandidateOrigin::AppState;
        records = app_products
            .iter()
            .map(|product| listing_candidate_from_state(product, &settings.site))
            .filter(ExtractionCandidate::has_identity)
            .map(ExtractionCandidate::into_listing_record)
            .collect();
    }

    tracing::info!(records = records.len(), source = %source, "listing extracted");
    Ok(ListingExtraction {
        records,
        source,
        dom_containers,
        app_state_products: app_products.len(),
    })
}

/// Builds a candidate from one entry of the application-state products
/// collection.
#[must_use]
pub fn listing_candidate_from_state(product: &Value, site: &SiteRoot) -> ExtractionCandidate {
    ExtractionCandidate {
        name: RawValue::from_json(first_scalar(product, &[&["name"]])),
        price: RawValue::from_json(first_scalar(
            product,
            &[&["priceWithoutEhf"], &["salePrice"], &["price"]],
        )),
        discount: RawValue::from_json(lookup(product, &["saving"])),
        rating_average: RawValue::from_json(first_scalar(
            product,
            &[&["ratingAverage"], &["rating"]],
        )),
        rating_count: RawValue::from_json(first_scalar(
            product,
            &[&["ratingCount"], &["reviews"]],
        )),
        url: site.product_url(product),
        ..ExtractionCandidate::empty(CandidateOrigin::AppState)
    }
}

async fn dom_candidate<P: PageController>(
    page: &P,
    item: &Locator,
    anchors: &[String],
    site: &SiteRoot,
) -> Result<ExtractionCandidate, ScraperError> {
    let scope = Some(item);
    let name = read_field(page, scope, listing::NAME, Duration::ZERO, non_blank).await?;
    if !name.is_present() {
        // Nothing else matters for an item that cannot be identified.
        return Ok(ExtractionCandidate::empty(CandidateOrigin::Dom));
    }

    let price = read_field(page, scope, listing::PRICE, Duration::ZERO, non_blank).await?;
    let discount = read_field(page, scope, listing::DISCOUNT, Duration::ZERO, non_blank).await?;
    let rating_average =
        read_field(page, scope, listing::RATING_AVERAGE, Duration::ZERO, has_rating).await?;
    let rating_count =
        read_field(page, scope, listing::RATING_COUNT, Duration::ZERO, has_digit).await?;
    let url = read_href(page, scope, anchors)
        .await?
        .map(|href| site.absolutize(&href))
        .unwrap_or_default();

    Ok(ExtractionCandidate {
        name,
        price,
        discount,
        rating_average,
        rating_count,
        url,
        ..ExtractionCandidate::empty(CandidateOrigin::Dom)
    })
}

/// Polls the listing state until its products collection is non-empty or
/// `timeout` elapses, then returns the last snapshot read.
async fn wait_for_app_state<P: PageController>(
    page: &P,
    timeout: Duration,
) -> Result<Value, ScraperError> {
    let populated = poll_until(timeout, || async move {
        let state = probe_app_state(page, LISTING_STATE_SCRIPT).await?;
        Ok(!array_at(&state, LISTING_PRODUCTS_PATH).is_empty())
    })
    .await?;
    if !populated {
        tracing::debug!(?timeout, "application state products never appeared");
    }
    probe_app_state(page, LISTING_STATE_SCRIPT).await
}
