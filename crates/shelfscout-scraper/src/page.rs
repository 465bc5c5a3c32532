//! The page-controller seam between the extraction engine and a live browser.
//!
//! Every operation suspends the caller until it completes or its own bound
//! elapses. The engine only ever holds one controller and drives it
//! sequentially; nothing here is shared across tasks.

use std::future::Future;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::ScraperError;
use crate::locator::Locator;

/// Interval between polls of a bounded wait.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A single browser tab as seen by the extraction engine.
///
/// Implementors provide the primitive reads and actions; the bounded waits
/// (`navigate`, `wait_for_selector`, `click_when_ready`) are built on top of
/// them here so every implementation times out the same way.
#[allow(async_fn_in_trait)]
pub trait PageController {
    /// Loads `url` in the tab without waiting for any content signal.
    async fn open(&self, url: &str) -> Result<(), ScraperError>;

    /// Number of elements currently matching `locator`.
    async fn count(&self, locator: &Locator) -> Result<usize, ScraperError>;

    /// Rendered text of the first match, or `None` when nothing matches.
    async fn text(&self, locator: &Locator) -> Result<Option<String>, ScraperError>;

    /// Attribute value of the first match. `href` resolves to an absolute URL.
    async fn attribute(&self, locator: &Locator, name: &str)
        -> Result<Option<String>, ScraperError>;

    /// Clicks the first match.
    ///
    /// # Errors
    ///
    /// [`ScraperError::ElementNotFound`] when nothing matches and
    /// [`ScraperError::ElementNotInteractable`] when the match is hidden or
    /// disabled. Both are expected outcomes for callers.
    async fn click(&self, locator: &Locator) -> Result<(), ScraperError>;

    /// Runs `src` as an expression in the page and returns its JSON value.
    /// `undefined` comes back as [`Value::Null`].
    async fn evaluate_script(&self, src: &str) -> Result<Value, ScraperError>;

    /// Scrolls to the bottom of the document and reports whether the
    /// document grew while content settled.
    async fn scroll_to_bottom(&self) -> Result<bool, ScraperError>;

    /// Serialized DOM of the current document.
    async fn page_source(&self) -> Result<String, ScraperError>;

    /// Loads `url` and waits until `ready` is present. The load and the wait
    /// share one `timeout`: the wait only gets what the load left over.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Navigation`] when the page fails to load or `ready`
    /// never appears within `timeout`.
    async fn navigate(
        &self,
        url: &str,
        ready: &Locator,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let started = Instant::now();
        self.open(url).await?;
        let remaining = timeout.saturating_sub(started.elapsed());
        self.wait_for_selector(ready, remaining)
            .await
            .map_err(|err| ScraperError::Navigation {
                url: url.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Waits until at least one element matches `locator`.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Timeout`] when nothing matched within `timeout`.
    async fn wait_for_selector(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let found = poll_until(timeout, || async move {
            Ok(self.count(locator).await? > 0)
        })
        .await?;
        if found {
            Ok(())
        } else {
            Err(ScraperError::Timeout {
                what: locator.to_string(),
                timeout,
            })
        }
    }

    /// Retries [`PageController::click`] until it succeeds or `timeout`
    /// elapses, mirroring an "element is clickable" wait.
    ///
    /// # Errors
    ///
    /// Returns the last recoverable click failure once the wait is exhausted,
    /// or any non-recoverable failure immediately.
    async fn click_when_ready(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let started = Instant::now();
        loop {
            match self.click(locator).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_recoverable() => {
                    let elapsed = started.elapsed();
                    if elapsed >= timeout {
                        return Err(err);
                    }
                    tokio::time::sleep(POLL_INTERVAL.min(timeout - elapsed)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Polls `probe` every [`POLL_INTERVAL`] until it reports `true` or `timeout`
/// elapses. The probe always runs at least once, so a zero timeout is a
/// single check.
///
/// Recoverable probe errors count as "not yet"; others are returned.
///
/// # Errors
///
/// Propagates non-recoverable errors from `probe`.
pub async fn poll_until<F, Fut>(timeout: Duration, mut probe: F) -> Result<bool, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ScraperError>>,
{
    let started = Instant::now();
    loop {
        match probe().await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) if err.is_recoverable() => {
                tracing::debug!(error = %err, "poll probe failed, treating as not ready");
            }
            Err(err) => return Err(err),
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Ok(false);
        }
        tokio::time::sleep(POLL_INTERVAL.min(timeout - elapsed)).await;
    }
}
