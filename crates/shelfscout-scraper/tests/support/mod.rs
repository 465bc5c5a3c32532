//! Scripted in-memory page controller for engine tests.
//!
//! Documents are keyed by URL and answer lookups by exact XPath string, so
//! tests build the same locators the engine does and register values for
//! them.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use shelfscout_scraper::expand::ExpansionSettings;
use shelfscout_scraper::selectors::{LISTING_ITEM, MAIN_CONTENT};
use shelfscout_scraper::{ListingSettings, Locator, PageController, ProductSettings, ScraperError, SiteRoot};

pub const SEARCH_URL: &str = "https://shop.example/en-ca/search?search=camera";

#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    counts: HashMap<String, usize>,
    texts: HashMap<String, String>,
    attrs: HashMap<(String, String), String>,
    scripts: HashMap<String, Value>,
    source: String,
}

impl FakeDocument {
    /// A document whose main content has rendered.
    pub fn rendered() -> Self {
        Self::default().with_count(MAIN_CONTENT, 1)
    }

    pub fn with_count(mut self, xpath: impl Into<String>, count: usize) -> Self {
        self.counts.insert(xpath.into(), count);
        self
    }

    pub fn with_text(mut self, xpath: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(xpath.into(), text.into());
        self
    }

    pub fn with_attr(
        mut self,
        xpath: impl Into<String>,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        self.attrs.insert((xpath.into(), name.to_owned()), value.into());
        self
    }

    pub fn with_script(mut self, src: &str, value: Value) -> Self {
        self.scripts.insert(src.to_owned(), value);
        self
    }

    pub fn with_source(mut self, html: &str) -> Self {
        self.source = html.to_owned();
        self
    }

    fn count(&self, xpath: &str) -> usize {
        if let Some(count) = self.counts.get(xpath) {
            return *count;
        }
        let has_text = self.texts.contains_key(xpath);
        let has_attr = self.attrs.keys().any(|(x, _)| x == xpath);
        usize::from(has_text || has_attr)
    }
}

#[derive(Debug, Default)]
struct FakeState {
    current: Option<String>,
    /// Remaining successful clicks per locator; `None` clicks forever.
    clickable: HashMap<String, Option<usize>>,
    scroll_growth: VecDeque<bool>,
    clicks: Vec<String>,
    visits: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakePage {
    documents: HashMap<String, FakeDocument>,
    /// Time every `open` takes before the document is current.
    load_time: Duration,
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, document: FakeDocument) -> Self {
        self.documents.insert(url.to_owned(), document);
        self
    }

    pub fn loading_for(mut self, load_time: Duration) -> Self {
        self.load_time = load_time;
        self
    }

    /// `locator` accepts `times` clicks, then reports not found.
    pub fn clickable(self, locator: &str, times: usize) -> Self {
        self.lock().clickable.insert(locator.to_owned(), Some(times));
        self
    }

    /// `locator` accepts every click.
    pub fn always_clickable(self, locator: &str) -> Self {
        self.lock().clickable.insert(locator.to_owned(), None);
        self
    }

    /// Queues scroll-probe results; once exhausted, probes see no growth.
    pub fn scroll_growth(self, growth: &[bool]) -> Self {
        self.lock().scroll_growth.extend(growth);
        self
    }

    pub fn clicks(&self) -> Vec<String> {
        self.lock().clicks.clone()
    }

    pub fn visits(&self) -> Vec<String> {
        self.lock().visits.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake page state poisoned")
    }

    fn with_current<T>(&self, read: impl FnOnce(&FakeDocument) -> T) -> Option<T> {
        let current = self.lock().current.clone()?;
        self.documents.get(&current).map(read)
    }
}

impl PageController for FakePage {
    async fn open(&self, url: &str) -> Result<(), ScraperError> {
        if !self.load_time.is_zero() {
            tokio::time::sleep(self.load_time).await;
        }
        let mut state = self.lock();
        state.visits.push(url.to_owned());
        if self.documents.contains_key(url) {
            state.current = Some(url.to_owned());
            Ok(())
        } else {
            state.current = None;
            Err(ScraperError::Navigation {
                url: url.to_owned(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_owned(),
            })
        }
    }

    async fn count(&self, locator: &Locator) -> Result<usize, ScraperError> {
        Ok(self
            .with_current(|doc| doc.count(locator.as_str()))
            .unwrap_or_default())
    }

    async fn text(&self, locator: &Locator) -> Result<Option<String>, ScraperError> {
        Ok(self
            .with_current(|doc| doc.texts.get(locator.as_str()).cloned())
            .flatten())
    }

    async fn attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, ScraperError> {
        let key = (locator.as_str().to_owned(), name.to_owned());
        Ok(self
            .with_current(|doc| doc.attrs.get(&key).cloned())
            .flatten())
    }

    async fn click(&self, locator: &Locator) -> Result<(), ScraperError> {
        let mut state = self.lock();
        let not_found = || ScraperError::ElementNotFound {
            locator: locator.to_string(),
        };
        match state.clickable.get_mut(locator.as_str()) {
            Some(None) => {}
            Some(Some(remaining)) if *remaining > 0 => *remaining -= 1,
            _ => return Err(not_found()),
        }
        state.clicks.push(locator.to_string());
        Ok(())
    }

    async fn evaluate_script(&self, src: &str) -> Result<Value, ScraperError> {
        self.with_current(|doc| doc.scripts.get(src).cloned())
            .flatten()
            .ok_or_else(|| ScraperError::Script {
                reason: "ReferenceError: AppEventData is not defined".to_owned(),
            })
    }

    async fn scroll_to_bottom(&self) -> Result<bool, ScraperError> {
        Ok(self.lock().scroll_growth.pop_front().unwrap_or(false))
    }

    async fn page_source(&self) -> Result<String, ScraperError> {
        Ok(self
            .with_current(|doc| doc.source.clone())
            .unwrap_or_default())
    }
}

/// XPath of an item-relative field on the `index`-th (1-based) listing item.
pub fn item_field(index: usize, relative: &str) -> String {
    Locator::xpath(LISTING_ITEM)
        .nth(index)
        .join(relative)
        .as_str()
        .to_owned()
}

pub fn expansion_settings(max_iterations: usize) -> ExpansionSettings {
    ExpansionSettings {
        click_timeout: Duration::ZERO,
        settle: Duration::ZERO,
        max_iterations,
        budget: Duration::from_secs(60),
    }
}

pub fn listing_settings() -> ListingSettings {
    ListingSettings {
        search_url: SEARCH_URL.to_owned(),
        site: SiteRoot::from_search_url(SEARCH_URL, "/en-ca").expect("valid search URL"),
        nav_timeout: Duration::ZERO,
        consent_timeout: Duration::ZERO,
        app_state_timeout: Duration::ZERO,
        expansion: expansion_settings(20),
    }
}

pub fn product_settings() -> ProductSettings {
    ProductSettings {
        nav_timeout: Duration::ZERO,
        consent_timeout: Duration::ZERO,
        selector_timeout: Duration::ZERO,
        delay: Duration::ZERO,
    }
}
