pub mod assemble;
pub mod browser;
pub mod candidate;
pub mod dom;
pub mod error;
pub mod expand;
pub mod extract;
pub mod locator;
pub mod normalize;
pub mod page;
pub mod selectors;
pub mod state;
pub mod urls;

pub use assemble::{dedup_urls, AssembledListing, RecordAssembler};
pub use browser::{BrowserSession, SessionOptions};
pub use candidate::{CandidateOrigin, ExtractionCandidate};
pub use error::ScraperError;
pub use expand::{expand_listing, ExpansionOutcome, ExpansionReport, ExpansionSettings};
pub use extract::{
    crawl_listing, crawl_products, extract_listing, scrape_product, ListingCrawl,
    ListingExtraction, ListingSettings, ProductCrawl, ProductSettings,
};
pub use locator::Locator;
pub use page::PageController;
pub use urls::SiteRoot;
