//! Product-page extraction and the sequential product crawl.

use std::time::Duration;

use serde_json::Value;
use shelfscout_core::{CrawlConfig, Deadline, ProductRecord};

use crate::candidate::{CandidateOrigin, ExtractionCandidate};
use crate::dom::{has_digit, has_rating, non_blank, read_field};
use crate::error::ScraperError;
use crate::locator::Locator;
use crate::page::PageController;
use crate::selectors::{product, MAIN_CONTENT};
use crate::state::{first_object, first_scalar, RawValue};

use super::{dismiss_consent, probe_app_state};

/// Consent banners on product pages are either there immediately or not at
/// all, so the wait is shorter than on the search page.
pub const PRODUCT_CONSENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Returns the product-related slices of the client-rendering state.
pub const PRODUCT_STATE_SCRIPT: &str = r"(() => {
  const s = (window.AppEventData && window.AppEventData.computedState && window.AppEventData.computedState.state) || {};
  return {
    pdp: s.pdp || null,
    product: s.product || null,
    customerReviews: s.customerReviews || null,
    productName: s.productName || null,
    description: s.description || null
  };
})()";

#[derive(Debug, Clone)]
pub struct ProductSettings {
    pub nav_timeout: Duration,
    pub consent_timeout: Duration,
    pub selector_timeout: Duration,
    /// Pause between consecutive product visits.
    pub delay: Duration,
}

impl ProductSettings {
    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            nav_timeout: config.nav_timeout(),
            consent_timeout: config.consent_timeout().min(PRODUCT_CONSENT_TIMEOUT),
            selector_timeout: config.selector_timeout(),
            delay: config.product_delay(),
        }
    }
}

/// Outcome of a product crawl: one record per input URL, plus how many of
/// those records are placeholders and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCrawl {
    pub records: Vec<ProductRecord>,
    /// Visits that ended in an error.
    pub failed: usize,
    /// URLs never visited because the run deadline had passed.
    pub skipped: usize,
}

/// Visits every URL in order and returns exactly one record per URL.
///
/// A visit that fails, or that the deadline prevents from starting, yields a
/// placeholder record carrying only the source URL, so the output table
/// always lines up with the input list.
pub async fn crawl_products<P: PageController>(
    page: &P,
    urls: &[String],
    settings: &ProductSettings,
    deadline: &Deadline,
) -> ProductCrawl {
    let total = urls.len();
    let mut crawl = ProductCrawl {
        records: Vec::with_capacity(total),
        ..ProductCrawl::default()
    };

    for (idx, url) in urls.iter().enumerate() {
        if deadline.is_expired() {
            crawl.skipped = total - idx;
            tracing::warn!(
                skipped = crawl.skipped,
                "run deadline reached, emitting placeholders for remaining URLs"
            );
            crawl
                .records
                .extend(urls[idx..].iter().map(|u| ProductRecord::placeholder(u)));
            break;
        }

        if idx > 0 && !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }

        tracing::info!("[{}/{}] scraping {}", idx + 1, total, url);
        match scrape_product(page, url, settings, deadline).await {
            Ok(record) => crawl.records.push(record),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "failed to scrape product");
                crawl.failed += 1;
                crawl.records.push(ProductRecord::placeholder(url));
            }
        }
    }

    crawl
}

/// Loads one product page and extracts its record.
///
/// The application-state candidate wins when it carries an identity; the
/// DOM candidate is used otherwise, even if it is empty, so every visited
/// page produces a row.
///
/// # Errors
///
/// [`ScraperError::Navigation`] when the page never renders its main content,
/// and any other non-recoverable page failure.
pub async fn scrape_product<P: PageController>(
    page: &P,
    url: &str,
    settings: &ProductSettings,
    deadline: &Deadline,
) -> Result<ProductRecord, ScraperError> {
    page.navigate(url, &Locator::xpath(MAIN_CONTENT), settings.nav_timeout)
        .await?;
    dismiss_consent(page, deadline.cap(settings.consent_timeout)).await?;

    let state = probe_app_state(page, PRODUCT_STATE_SCRIPT).await?;
    let app_candidate = product_candidate_from_state(&state);
    let candidate = if app_candidate.has_identity() {
        app_candidate
    } else {
        dom_candidate(page, deadline.cap(settings.selector_timeout)).await?
    };

    tracing::debug!(url, source = %candidate.origin, "product extracted");
    Ok(candidate.into_product_record(url))
}

/// Resolves a product candidate from [`PRODUCT_STATE_SCRIPT`]'s result.
///
/// `product` is `pdp.product` or the top-level `product`; its `pricing`
/// object (or `price`, when that is an object) carries the current price.
#[must_use]
pub fn product_candidate_from_state(state: &Value) -> ExtractionCandidate {
    let product = first_object(state, &[&["pdp", "product"], &["product"]]);
    let reviews = first_object(state, &[&["pdp", "customerReviews"], &["customerReviews"]]);
    let pricing = product.and_then(|p| first_object(p, &[&["pricing"], &["price"]]));

    let from_product = |aliases: &[&[&str]]| product.and_then(|p| first_scalar(p, aliases));
    let from_reviews = |aliases: &[&[&str]]| reviews.and_then(|r| first_scalar(r, aliases));

    let name = from_product(&[&["name"], &["title"]])
        .or_else(|| first_scalar(state, &[&["productName"]]));
    let price = pricing
        .and_then(|p| first_scalar(p, &[&["current"], &["sale"]]))
        .or_else(|| from_product(&[&["priceWithoutEhf"], &["salePrice"], &["price"]]));
    let rating_average = from_reviews(&[&["ratingAverage"], &["average"]])
        .or_else(|| from_product(&[&["ratingAverage"], &["rating"]]));
    let rating_count = from_reviews(&[&["ratingCount"], &["count"]])
        .or_else(|| from_product(&[&["ratingCount"], &["reviews"]]));
    let description = from_product(&[&["longDescription"], &["description"]])
        .or_else(|| first_scalar(state, &[&["pdp", "longDescription"], &["description"]]));

    ExtractionCandidate {
        name: RawValue::from_json(name),
        price: RawValue::from_json(price),
        rating_average: RawValue::from_json(rating_average),
        rating_count: RawValue::from_json(rating_count),
        description: RawValue::from_json(description),
        ..ExtractionCandidate::empty(CandidateOrigin::AppState)
    }
}

async fn dom_candidate<P: PageController>(
    page: &P,
    wait: Duration,
) -> Result<ExtractionCandidate, ScraperError> {
    Ok(ExtractionCandidate {
        name: read_field(page, None, product::TITLE, wait, non_blank).await?,
        price: read_field(page, None, product::PRICE, wait, non_blank).await?,
        rating_average: read_field(page, None, product::RATING_AVERAGE, wait, has_rating)
            .await?,
        rating_count: read_field(page, None, product::RATING_COUNT, wait, has_digit).await?,
        description: read_field(page, None, product::DESCRIPTION, wait, non_blank).await?,
        ..ExtractionCandidate::empty(CandidateOrigin::Dom)
    })
}
