//! DOM-selector field reads: walk a strategy table until one yields a value.

use std::time::Duration;

use crate::error::ScraperError;
use crate::locator::Locator;
use crate::normalize::parse_rating_average;
use crate::page::PageController;
use crate::selectors::{Probe, SelectorStrategy};
use crate::state::RawValue;

/// Accepts any text that is not blank.
#[must_use]
pub fn non_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Accepts text that contains a rating average in range.
#[must_use]
pub fn has_rating(text: &str) -> bool {
    parse_rating_average(text).is_some()
}

/// Accepts text that contains at least one digit.
#[must_use]
pub fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Resolves a strategy's locator, joined onto `scope` for item-relative reads.
#[must_use]
pub fn resolve(scope: Option<&Locator>, xpath: &str) -> Locator {
    match scope {
        Some(scope) => scope.join(xpath),
        None => Locator::xpath(xpath),
    }
}

/// Tries each strategy in order and returns the first value `accept` allows.
///
/// Missing elements, failed waits and script errors all mean "try the next
/// strategy"; when every strategy misses the field is [`RawValue::Absent`].
///
/// # Errors
///
/// Only non-recoverable failures (a dead browser session) are returned.
pub async fn read_field<P, F>(
    page: &P,
    scope: Option<&Locator>,
    strategies: &[SelectorStrategy],
    wait_timeout: Duration,
    accept: F,
) -> Result<RawValue, ScraperError>
where
    P: PageController,
    F: Fn(&str) -> bool,
{
    for strategy in strategies {
        let locator = resolve(scope, strategy.xpath);

        if strategy.wait {
            match page.wait_for_selector(&locator, wait_timeout).await {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(locator = %locator, error = %err, "selector wait missed");
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        let value = match strategy.probe {
            Probe::Text => page.text(&locator).await,
            Probe::Attribute(name) => page.attribute(&locator, name).await,
        };
        match value {
            Ok(Some(raw)) if accept(&raw) => return Ok(RawValue::Text(raw)),
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                tracing::debug!(locator = %locator, error = %err, "selector read failed");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(RawValue::Absent)
}

/// Reads the first non-blank `href` from a list of anchor locators.
///
/// # Errors
///
/// Only non-recoverable failures are returned.
pub async fn read_href<P: PageController>(
    page: &P,
    scope: Option<&Locator>,
    anchors: &[String],
) -> Result<Option<String>, ScraperError> {
    for anchor in anchors {
        let locator = resolve(scope, anchor);
        match page.attribute(&locator, "href").await {
            Ok(Some(href)) if non_blank(&href) => return Ok(Some(href.trim().to_owned())),
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                tracing::debug!(locator = %locator, error = %err, "anchor read failed");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}
