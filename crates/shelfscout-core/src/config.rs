use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::CrawlConfig;
use crate::ConfigError;

const DEFAULT_SEARCH_URL: &str = "https://www.bestbuy.ca/en-ca/search?search=security+camera";

/// Load crawl configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_crawl_config() -> Result<CrawlConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_crawl_config_from_env()
}

/// Load crawl configuration from environment variables already in the process.
///
/// Unlike [`load_crawl_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_crawl_config_from_env() -> Result<CrawlConfig, ConfigError> {
    build_crawl_config(|key| std::env::var(key))
}

/// Build crawl configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the reference
/// behavior: a headed 1200x900 session against the default search page.
fn build_crawl_config<F>(lookup: F) -> Result<CrawlConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_value::<u64>(var, &or_default(var, default))
    };

    let log_level = or_default("SHELFSCOUT_LOG_LEVEL", "info");
    let search_url = or_default("SHELFSCOUT_SEARCH_URL", DEFAULT_SEARCH_URL);
    let path_prefix = normalize_path_prefix(&or_default("SHELFSCOUT_PATH_PREFIX", "/en-ca"));
    let headless = parse_bool("SHELFSCOUT_HEADLESS", &or_default("SHELFSCOUT_HEADLESS", "false"))?;

    let window_width = parse_value::<u32>(
        "SHELFSCOUT_WINDOW_WIDTH",
        &or_default("SHELFSCOUT_WINDOW_WIDTH", "1200"),
    )?;
    let window_height = parse_value::<u32>(
        "SHELFSCOUT_WINDOW_HEIGHT",
        &or_default("SHELFSCOUT_WINDOW_HEIGHT", "900"),
    )?;

    let nav_timeout_secs = parse("SHELFSCOUT_NAV_TIMEOUT_SECS", "30")?;
    let click_timeout_secs = parse("SHELFSCOUT_CLICK_TIMEOUT_SECS", "10")?;
    let consent_timeout_secs = parse("SHELFSCOUT_CONSENT_TIMEOUT_SECS", "5")?;
    let selector_timeout_secs = parse("SHELFSCOUT_SELECTOR_TIMEOUT_SECS", "5")?;
    let app_state_timeout_secs = parse("SHELFSCOUT_APP_STATE_TIMEOUT_SECS", "10")?;
    let settle_ms = parse("SHELFSCOUT_SETTLE_MS", "2000")?;
    let scroll_settle_ms = parse("SHELFSCOUT_SCROLL_SETTLE_MS", "1500")?;
    let product_delay_ms = parse("SHELFSCOUT_PRODUCT_DELAY_MS", "500")?;
    let max_expansions = parse_value::<usize>(
        "SHELFSCOUT_MAX_EXPANSIONS",
        &or_default("SHELFSCOUT_MAX_EXPANSIONS", "200"),
    )?;
    let expansion_budget_secs = parse("SHELFSCOUT_EXPANSION_BUDGET_SECS", "300")?;
    let run_deadline_secs = parse("SHELFSCOUT_RUN_DEADLINE_SECS", "3600")?;

    let listing_csv = PathBuf::from(or_default("SHELFSCOUT_LISTING_CSV", "searchresults.csv"));
    let urls_path = PathBuf::from(or_default("SHELFSCOUT_URLS_PATH", "product_urls.txt"));
    let snapshot_path = PathBuf::from(or_default("SHELFSCOUT_SNAPSHOT_PATH", "debug_page.html"));
    let products_csv = PathBuf::from(or_default(
        "SHELFSCOUT_PRODUCTS_CSV",
        "products_details.csv",
    ));

    if max_expansions == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCOUT_MAX_EXPANSIONS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(CrawlConfig {
        log_level,
        search_url,
        path_prefix,
        headless,
        window_width,
        window_height,
        nav_timeout_secs,
        click_timeout_secs,
        consent_timeout_secs,
        selector_timeout_secs,
        app_state_timeout_secs,
        settle_ms,
        scroll_settle_ms,
        product_delay_ms,
        max_expansions,
        expansion_budget_secs,
        run_deadline_secs,
        listing_csv,
        urls_path,
        snapshot_path,
        products_csv,
    })
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Accepts the usual spellings of a boolean flag.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Forces a single leading slash and no trailing slash: `"en-ca/"` → `"/en-ca"`.
fn normalize_path_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
