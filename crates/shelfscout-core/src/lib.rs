pub mod app_config;
pub mod config;
pub mod deadline;
pub mod records;

pub use app_config::CrawlConfig;
pub use config::{load_crawl_config, load_crawl_config_from_env};
pub use deadline::Deadline;
pub use records::{ListingRecord, ProductRecord, LISTING_HEADERS, PRODUCT_HEADERS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
