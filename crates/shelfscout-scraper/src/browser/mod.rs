//! Chromium-backed [`PageController`] over the DevTools protocol.

mod scripts;

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use shelfscout_core::CrawlConfig;
use tokio::task::JoinHandle;

use crate::error::ScraperError;
use crate::locator::Locator;
use crate::page::PageController;

/// Launch-time settings for a [`BrowserSession`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Upper bound on a single page load.
    pub nav_timeout: Duration,
    /// Pause inside a scroll probe before re-measuring the document.
    pub scroll_settle: Duration,
}

impl SessionOptions {
    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            headless: config.headless,
            window_width: config.window_width,
            window_height: config.window_height,
            nav_timeout: config.nav_timeout(),
            scroll_settle: config.scroll_settle(),
        }
    }
}

/// One incognito browser with a single working tab.
///
/// Call [`BrowserSession::close`] when done; dropping an unclosed session
/// only stops the protocol handler task.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    options: SessionOptions,
    closed: bool,
}

impl BrowserSession {
    /// # Errors
    ///
    /// [`ScraperError::Browser`] when the browser cannot be configured,
    /// launched, or cannot open its working tab.
    pub async fn launch(options: SessionOptions) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .window_size(options.window_width, options.window_height)
            .viewport(None)
            .arg("--incognito");
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| ScraperError::Browser(format!("browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Browser(format!("browser launch failed: {e}")))?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(ScraperError::Browser(format!("failed to open tab: {e}")));
            }
        };

        tracing::info!(
            headless = options.headless,
            width = options.window_width,
            height = options.window_height,
            "browser session started"
        );
        Ok(Self {
            browser,
            page,
            handler,
            options,
            closed: false,
        })
    }

    /// Closes the browser and waits for the process to exit.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Browser`] when the close command fails. The handler
    /// task is stopped either way.
    pub async fn close(&mut self) -> Result<(), ScraperError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.browser.close().await;
        if result.is_ok() {
            if let Err(e) = self.browser.wait().await {
                tracing::debug!(error = %e, "browser process wait failed");
            }
        }
        self.handler.abort();
        tracing::info!("browser session closed");
        result
            .map(|_| ())
            .map_err(|e| ScraperError::Browser(format!("browser close failed: {e}")))
    }

    async fn eval(&self, script: &str) -> Result<Value, ScraperError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::Script {
                reason: e.to_string(),
            })?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn eval_string(&self, script: &str) -> Result<Option<String>, ScraperError> {
        Ok(self.eval(script).await?.as_str().map(str::to_owned))
    }

    async fn scroll_height(&self) -> Result<f64, ScraperError> {
        Ok(self
            .eval(scripts::SCROLL_HEIGHT)
            .await?
            .as_f64()
            .unwrap_or_default())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("browser session dropped without close; stopping handler");
            self.handler.abort();
        }
    }
}

impl PageController for BrowserSession {
    async fn open(&self, url: &str) -> Result<(), ScraperError> {
        let navigation = tokio::time::timeout(self.options.nav_timeout, self.page.goto(url))
            .await
            .map_err(|_| ScraperError::Navigation {
                url: url.to_owned(),
                reason: format!("page load exceeded {:?}", self.options.nav_timeout),
            })?;
        navigation.map(|_| ()).map_err(|e| ScraperError::Navigation {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }

    async fn count(&self, locator: &Locator) -> Result<usize, ScraperError> {
        let value = self.eval(&scripts::count(locator.as_str())).await?;
        Ok(value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default())
    }

    async fn text(&self, locator: &Locator) -> Result<Option<String>, ScraperError> {
        self.eval_string(&scripts::text(locator.as_str())).await
    }

    async fn attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, ScraperError> {
        self.eval_string(&scripts::attribute(locator.as_str(), name))
            .await
    }

    async fn click(&self, locator: &Locator) -> Result<(), ScraperError> {
        let outcome = self
            .eval_string(&scripts::click(locator.as_str()))
            .await?
            .unwrap_or_default();
        match outcome.as_str() {
            scripts::CLICKED => Ok(()),
            scripts::MISSING => Err(ScraperError::ElementNotFound {
                locator: locator.to_string(),
            }),
            scripts::HIDDEN => Err(ScraperError::ElementNotInteractable {
                locator: locator.to_string(),
                reason: "hidden, zero-sized or disabled".to_owned(),
            }),
            other => Err(ScraperError::Script {
                reason: format!("unexpected click result {other:?}"),
            }),
        }
    }

    async fn evaluate_script(&self, src: &str) -> Result<Value, ScraperError> {
        self.eval(src).await
    }

    async fn scroll_to_bottom(&self) -> Result<bool, ScraperError> {
        let before = self.scroll_height().await?;
        self.eval(scripts::SCROLL_TO_BOTTOM).await?;
        tokio::time::sleep(self.options.scroll_settle).await;
        let after = self.scroll_height().await?;
        Ok(after > before)
    }

    async fn page_source(&self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::Browser(format!("failed to read page source: {e}")))
    }
}
