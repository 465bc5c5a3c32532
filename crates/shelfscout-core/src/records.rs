use serde::{Deserialize, Serialize};

/// Column headers of the listing table, in output order.
pub const LISTING_HEADERS: [&str; 6] = [
    "Name",
    "Sale Price",
    "Discount",
    "Rating",
    "Number of Reviews",
    "URL",
];

/// Column headers of the product-detail table, in output order.
pub const PRODUCT_HEADERS: [&str; 6] = [
    "Title",
    "Price",
    "Rating",
    "Number of Reviews",
    "Description",
    "URL",
];

/// One product summary scraped from a search-results listing.
///
/// Records are assembled once per listing element and never mutated after
/// they leave the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Name")]
    pub name: String,
    /// Price text exactly as displayed, e.g. `"$49.99"`. Currency is not parsed.
    #[serde(rename = "Sale Price")]
    pub sale_price: String,
    /// Savings text, e.g. `"$20"`. Empty when the item is not discounted.
    #[serde(rename = "Discount")]
    pub discount: String,
    /// Average rating in `[0, 5]`. `None` means "no usable rating", which is
    /// distinct from an item rated zero.
    #[serde(rename = "Rating")]
    pub rating_average: Option<f64>,
    #[serde(rename = "Number of Reviews")]
    pub rating_count: u32,
    /// Canonical product URL; empty when nothing could be resolved.
    #[serde(rename = "URL")]
    pub url: String,
}

/// Full details scraped from a single product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Rating")]
    pub rating_average: Option<f64>,
    #[serde(rename = "Number of Reviews")]
    pub rating_count: u32,
    /// Whitespace-collapsed, single-line description.
    #[serde(rename = "Description")]
    pub description: String,
    /// The crawl input URL this record was scraped from.
    #[serde(rename = "URL")]
    pub source_url: String,
}

impl ProductRecord {
    /// Default-valued row for a product page that could not be scraped.
    ///
    /// Failed visits still produce a row so the output table lines up with
    /// the input URL list.
    #[must_use]
    pub fn placeholder(source_url: &str) -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            rating_average: None,
            rating_count: 0,
            description: String::new(),
            source_url: source_url.to_owned(),
        }
    }

    /// Returns `true` when no field beyond the source URL was populated.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.title.is_empty()
            && self.price.is_empty()
            && self.rating_average.is_none()
            && self.rating_count == 0
            && self.description.is_empty()
    }
}
