//! Content expansion: materialize the full listing before extraction.
//!
//! Each step tries to click a "show more" control. A successful click is
//! followed by a settle pause; a miss triggers one scroll probe, and a probe
//! that sees no growth ends the loop. The loop is additionally bounded by an
//! iteration count and a wall-clock budget so a control that stays clickable
//! forever cannot stall the run.

use std::time::{Duration, Instant};

use shelfscout_core::{CrawlConfig, Deadline};

use crate::error::ScraperError;
use crate::locator::{contains_text_ci, Locator};
use crate::page::PageController;
use crate::selectors::{LEGACY_SHOW_MORE, SHOW_MORE_LABEL};

#[derive(Debug, Clone)]
pub struct ExpansionSettings {
    /// How long the semantic control may take to become clickable.
    pub click_timeout: Duration,
    /// Pause after a successful click while new items are injected.
    pub settle: Duration,
    pub max_iterations: usize,
    pub budget: Duration,
}

impl ExpansionSettings {
    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            click_timeout: config.click_timeout(),
            settle: config.settle(),
            max_iterations: config.max_expansions,
            budget: config.expansion_budget(),
        }
    }
}

/// Why the expansion loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOutcome {
    /// No control to click and the page stopped growing.
    Exhausted,
    /// The iteration bound was hit; the listing may be partial.
    IterationLimit,
    /// The wall-clock budget (or run deadline) ran out; the listing may be
    /// partial.
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionReport {
    pub clicks: usize,
    pub scroll_probes: usize,
    pub outcome: ExpansionOutcome,
}

impl ExpansionReport {
    /// `true` when a bound, not the page, ended the loop.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.outcome != ExpansionOutcome::Exhausted
    }
}

/// The text-based "show more" button, matched case-insensitively.
#[must_use]
pub fn show_more_locator() -> Locator {
    Locator::xpath(format!(
        "//button[.//span[{}]]",
        contains_text_ci(SHOW_MORE_LABEL)
    ))
}

/// Drives "show more" clicks and scroll probes until the listing stops
/// growing or a bound is reached.
///
/// Hitting a bound is not an error: the report's outcome says so and the
/// caller extracts whatever has loaded.
///
/// # Errors
///
/// Only non-recoverable page failures (a dead browser session) are returned.
pub async fn expand_listing<P: PageController>(
    page: &P,
    settings: &ExpansionSettings,
    deadline: &Deadline,
) -> Result<ExpansionReport, ScraperError> {
    let budget = deadline.cap(settings.budget);
    let started = Instant::now();
    let semantic = show_more_locator();
    let legacy = Locator::xpath(LEGACY_SHOW_MORE);

    let mut clicks = 0usize;
    let mut scroll_probes = 0usize;
    let mut iterations = 0usize;

    let outcome = loop {
        if iterations >= settings.max_iterations {
            break ExpansionOutcome::IterationLimit;
        }
        let elapsed = started.elapsed();
        if elapsed >= budget {
            break ExpansionOutcome::BudgetExhausted;
        }
        iterations += 1;

        let click_timeout = settings.click_timeout.min(budget - elapsed);
        if click_show_more(page, &semantic, &legacy, click_timeout).await? {
            clicks += 1;
            tracing::info!(clicks, "\"show more\" clicked");
            tokio::time::sleep(settings.settle).await;
            continue;
        }

        scroll_probes += 1;
        let grew = match page.scroll_to_bottom().await {
            Ok(grew) => grew,
            Err(err) if err.is_recoverable() => {
                tracing::debug!(error = %err, "scroll probe failed, treating as no growth");
                false
            }
            Err(err) => return Err(err),
        };
        tracing::info!(scroll_probes, grew, "scroll probe");
        if !grew {
            break ExpansionOutcome::Exhausted;
        }
    };

    let report = ExpansionReport {
        clicks,
        scroll_probes,
        outcome,
    };
    if report.is_partial() {
        tracing::warn!(
            clicks,
            scroll_probes,
            outcome = ?outcome,
            "expansion stopped at its bound; listing may be partial"
        );
    } else {
        tracing::info!(clicks, scroll_probes, "listing fully expanded");
    }
    Ok(report)
}

/// One click attempt: the semantic control (waiting for it to become
/// clickable), then the legacy control once. Returns whether anything was
/// clicked.
async fn click_show_more<P: PageController>(
    page: &P,
    semantic: &Locator,
    legacy: &Locator,
    click_timeout: Duration,
) -> Result<bool, ScraperError> {
    match page.click_when_ready(semantic, click_timeout).await {
        Ok(()) => return Ok(true),
        Err(err) if err.is_recoverable() => {
            tracing::debug!(error = %err, "semantic show-more control unavailable");
        }
        Err(err) => return Err(err),
    }
    match page.click(legacy).await {
        Ok(()) => Ok(true),
        Err(err) if err.is_recoverable() => {
            tracing::debug!(error = %err, "legacy show-more control unavailable");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
