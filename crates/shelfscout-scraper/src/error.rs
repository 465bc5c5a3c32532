use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser session error: {0}")]
    Browser(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("no element matches {locator}")]
    ElementNotFound { locator: String },

    #[error("element {locator} is not interactable: {reason}")]
    ElementNotInteractable { locator: String, reason: String },

    #[error("in-page script failed: {reason}")]
    Script { reason: String },

    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("invalid site URL \"{url}\": {reason}")]
    InvalidSiteUrl { url: String, reason: String },
}

impl ScraperError {
    /// Returns `true` for failures that drive fallback decisions rather than
    /// aborting a page visit.
    ///
    /// Recoverable:
    /// - [`ScraperError::ElementNotFound`] and [`ScraperError::ElementNotInteractable`]
    ///   steer selector fallback and expansion-loop termination.
    /// - [`ScraperError::Script`] sends extraction to the DOM strategy.
    /// - [`ScraperError::Timeout`] on a bounded wait is an expected miss.
    ///
    /// Everything else ends the current page visit.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScraperError::ElementNotFound { .. }
                | ScraperError::ElementNotInteractable { .. }
                | ScraperError::Script { .. }
                | ScraperError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_and_script_failures_are_recoverable() {
        assert!(ScraperError::ElementNotFound {
            locator: "//button".to_owned()
        }
        .is_recoverable());
        assert!(ScraperError::Script {
            reason: "AppEventData is not defined".to_owned()
        }
        .is_recoverable());
        assert!(ScraperError::Timeout {
            what: "//main".to_owned(),
            timeout: Duration::from_secs(3)
        }
        .is_recoverable());
    }

    #[test]
    fn navigation_and_browser_failures_are_fatal() {
        assert!(!ScraperError::Navigation {
            url: "https://shop.example".to_owned(),
            reason: "main content never appeared".to_owned()
        }
        .is_recoverable());
        assert!(!ScraperError::Browser("launch failed".to_owned()).is_recoverable());
    }
}
