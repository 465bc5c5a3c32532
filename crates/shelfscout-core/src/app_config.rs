use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for a crawl, resolved from the environment.
///
/// Durations are stored in their configured units and exposed through
/// `Duration` accessors so call sites never juggle raw integers.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub log_level: String,
    pub search_url: String,
    /// Site-local path prefix of product links, e.g. `"/en-ca"`.
    pub path_prefix: String,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub nav_timeout_secs: u64,
    pub click_timeout_secs: u64,
    pub consent_timeout_secs: u64,
    pub selector_timeout_secs: u64,
    pub app_state_timeout_secs: u64,
    pub settle_ms: u64,
    pub scroll_settle_ms: u64,
    pub product_delay_ms: u64,
    pub max_expansions: usize,
    pub expansion_budget_secs: u64,
    pub run_deadline_secs: u64,
    pub listing_csv: PathBuf,
    pub urls_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub products_csv: PathBuf,
}

impl CrawlConfig {
    #[must_use]
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    #[must_use]
    pub fn click_timeout(&self) -> Duration {
        Duration::from_secs(self.click_timeout_secs)
    }

    #[must_use]
    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    #[must_use]
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    #[must_use]
    pub fn app_state_timeout(&self) -> Duration {
        Duration::from_secs(self.app_state_timeout_secs)
    }

    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[must_use]
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    #[must_use]
    pub fn product_delay(&self) -> Duration {
        Duration::from_millis(self.product_delay_ms)
    }

    #[must_use]
    pub fn expansion_budget(&self) -> Duration {
        Duration::from_secs(self.expansion_budget_secs)
    }

    #[must_use]
    pub fn run_deadline(&self) -> Duration {
        Duration::from_secs(self.run_deadline_secs)
    }
}
