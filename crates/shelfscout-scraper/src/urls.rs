//! Site origin derivation and product URL reconstruction.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ScraperError;
use crate::state::first_scalar;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Site root that relative product links resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    /// Scheme and host, e.g. `https://www.bestbuy.ca`.
    pub origin: String,
    /// Locale path prefix with a leading slash and no trailing slash, e.g.
    /// `/en-ca`. Empty when the site has none.
    pub path_prefix: String,
}

impl SiteRoot {
    /// Derives the root from the configured search URL.
    ///
    /// Given `"https://www.bestbuy.ca/en-ca/search?search=camera"` and prefix
    /// `"/en-ca"`, the origin is `"https://www.bestbuy.ca"`.
    ///
    /// # Errors
    ///
    /// [`ScraperError::InvalidSiteUrl`] when `search_url` does not parse or
    /// has no host.
    pub fn from_search_url(search_url: &str, path_prefix: &str) -> Result<Self, ScraperError> {
        let parsed = url::Url::parse(search_url).map_err(|e| ScraperError::InvalidSiteUrl {
            url: search_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.host_str().is_none() {
            return Err(ScraperError::InvalidSiteUrl {
                url: search_url.to_owned(),
                reason: "URL has no host".to_owned(),
            });
        }
        Ok(Self {
            origin: parsed.origin().ascii_serialization(),
            path_prefix: path_prefix.trim_end_matches('/').to_owned(),
        })
    }

    /// Makes a scraped `href` absolute. Absolute URLs pass through untouched.
    #[must_use]
    pub fn absolutize(&self, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() || is_absolute(href) {
            return href.to_owned();
        }
        if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            format!("{}/{href}", self.origin)
        }
    }

    /// Reconstructs a product page URL from an application-state product.
    ///
    /// Priority:
    /// 1. an explicit `productUrl` / `url` field (made absolute),
    /// 2. `{origin}{prefix}/product/{slug(name)}/{sku}` when both exist,
    /// 3. `{origin}{prefix}/sku/{sku}` when only the SKU exists,
    /// 4. the empty string.
    #[must_use]
    pub fn product_url(&self, product: &Value) -> String {
        if let Some(explicit) = first_scalar(product, &[&["productUrl"], &["url"]])
            .and_then(Value::as_str)
        {
            return self.absolutize(explicit);
        }

        let Some(sku) = sku_of(product) else {
            return String::new();
        };
        let slug = first_scalar(product, &[&["name"]])
            .and_then(Value::as_str)
            .map(slugify)
            .unwrap_or_default();

        if slug.is_empty() {
            format!("{}{}/sku/{sku}", self.origin, self.path_prefix)
        } else {
            format!("{}{}/product/{slug}/{sku}", self.origin, self.path_prefix)
        }
    }
}

/// Lowercases `name` and joins its alphanumeric runs with hyphens:
/// `"Cam B (2-Pack)"` → `"cam-b-2-pack"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_owned()
}

/// The product's SKU from `sku` or `skuId`, accepting strings or numbers.
fn sku_of(product: &Value) -> Option<String> {
    match first_scalar(product, &[&["sku"], &["skuId"]])? {
        Value::String(s) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_absolute(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> SiteRoot {
        SiteRoot::from_search_url(
            "https://www.bestbuy.ca/en-ca/search?search=security+camera",
            "/en-ca",
        )
        .expect("valid search URL")
    }

    #[test]
    fn origin_strips_path_and_query() {
        let root = root();
        assert_eq!(root.origin, "https://www.bestbuy.ca");
        assert_eq!(root.path_prefix, "/en-ca");
    }

    #[test]
    fn origin_keeps_non_default_port() {
        let root = SiteRoot::from_search_url("http://127.0.0.1:8080/search?q=x", "").unwrap();
        assert_eq!(root.origin, "http://127.0.0.1:8080");
    }

    #[test]
    fn invalid_search_url_is_rejected() {
        let err = SiteRoot::from_search_url("not a url", "/en-ca").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidSiteUrl { .. }));
    }

    #[test]
    fn absolutize_relative_href() {
        assert_eq!(
            root().absolutize("/en-ca/product/cam-a/1"),
            "https://www.bestbuy.ca/en-ca/product/cam-a/1"
        );
    }

    #[test]
    fn absolutize_keeps_absolute_href() {
        assert_eq!(
            root().absolutize("https://cdn.example/p/1"),
            "https://cdn.example/p/1"
        );
        assert_eq!(root().absolutize(""), "");
    }

    #[test]
    fn product_url_from_name_and_sku() {
        let product = json!({"name": "Cam B", "sku": "123"});
        assert_eq!(
            root().product_url(&product),
            "https://www.bestbuy.ca/en-ca/product/cam-b/123"
        );
    }

    #[test]
    fn product_url_prefers_explicit_field() {
        let product = json!({"name": "Cam B", "sku": "123", "productUrl": "/en-ca/product/x/9"});
        assert_eq!(
            root().product_url(&product),
            "https://www.bestbuy.ca/en-ca/product/x/9"
        );
    }

    #[test]
    fn product_url_numeric_sku_without_name() {
        let product = json!({"skuId": 456});
        assert_eq!(
            root().product_url(&product),
            "https://www.bestbuy.ca/en-ca/sku/456"
        );
    }

    #[test]
    fn product_url_without_sku_is_empty() {
        assert_eq!(root().product_url(&json!({"name": "Cam"})), "");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Cam B (2-Pack)"), "cam-b-2-pack");
        assert_eq!(slugify("  --  "), "");
    }
}
