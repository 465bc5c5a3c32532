//! Ordered DOM selector strategies per logical field.
//!
//! Each table runs from the most specific, stable locator to the most
//! generic one. Listing tables are item-relative and get joined onto the
//! item's scope; product tables are page-level.

/// How a matched element yields its raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Rendered text of the element.
    Text,
    /// Value of the named attribute.
    Attribute(&'static str),
}

/// One step in a field's fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorStrategy {
    pub xpath: &'static str,
    pub probe: Probe,
    /// Whether to wait (up to the selector timeout) for the element to
    /// appear before reading it. Only the slow-rendering product headline
    /// fields wait; everything else is read once.
    pub wait: bool,
}

const fn text(xpath: &'static str) -> SelectorStrategy {
    SelectorStrategy {
        xpath,
        probe: Probe::Text,
        wait: false,
    }
}

const fn waited_text(xpath: &'static str) -> SelectorStrategy {
    SelectorStrategy {
        xpath,
        probe: Probe::Text,
        wait: true,
    }
}

const fn attr(xpath: &'static str, name: &'static str) -> SelectorStrategy {
    SelectorStrategy {
        xpath,
        probe: Probe::Attribute(name),
        wait: false,
    }
}

/// Element that signals the page's main content has rendered.
pub const MAIN_CONTENT: &str = "//main";

/// Consent / region banner accept button.
pub const CONSENT_BUTTON: &str =
    "//button[contains(., 'Accept') or contains(., 'Got it') or contains(., 'I agree')]";

/// Structural "show more" container from an older page build.
pub const LEGACY_SHOW_MORE: &str = "//*[contains(@class,'content_3dXxd')]";

/// Text label on the semantic "show more" button, lowercase.
pub const SHOW_MORE_LABEL: &str = "show more";

/// One container per listing item.
pub const LISTING_ITEM: &str = "//div[contains(@class,'productItemTextContainer')]";

pub mod listing {
    use super::{attr, text, SelectorStrategy};

    pub const NAME: &[SelectorStrategy] = &[
        text(".//div[contains(@class,'productItemName')]"),
        text(".//*[@data-automation='productItemName']"),
        text(".//*[@itemprop='name']"),
        text(".//*[contains(@class,'name') and (self::div or self::span or self::h3)]"),
    ];

    pub const PRICE: &[SelectorStrategy] = &[
        text(".//div[starts-with(@class,'price_')]"),
        text(".//*[@data-automation='product-price']"),
        text(".//*[contains(@class,'price') and (self::div or self::span)]"),
    ];

    pub const DISCOUNT: &[SelectorStrategy] =
        &[text(".//span[contains(@class,'productSaving')]")];

    pub const RATING_AVERAGE: &[SelectorStrategy] = &[
        attr(".//meta[@itemprop='ratingValue']", "content"),
        text(".//*[contains(@class,'rating') and contains(@class,'average')]"),
    ];

    pub const RATING_COUNT: &[SelectorStrategy] = &[
        text(".//span[@itemprop='ratingCount']"),
        text(".//*[contains(.,'Review') and (self::span or self::div)]"),
    ];

    /// Anchor templates for the product link; `{prefix}` is replaced with the
    /// site's local path prefix. Tried inside the item, then on its enclosing
    /// anchor, then among its siblings.
    pub const URL_TEMPLATES: &[&str] = &[
        ".//a[contains(@href,'{prefix}/')]",
        "./ancestor::a[contains(@href,'{prefix}/')][1]",
        "..//a[contains(@href,'{prefix}/')]",
    ];
}

pub mod product {
    use super::{attr, text, waited_text, SelectorStrategy};

    pub const TITLE: &[SelectorStrategy] = &[
        waited_text("//h1[contains(@class,'productName')]"),
        waited_text("//h1[@data-automation='x-product-title']"),
        waited_text("//h1"),
        attr("//meta[@property='og:title']", "content"),
    ];

    pub const PRICE: &[SelectorStrategy] = &[
        waited_text("//div[starts-with(@class,'price_')]"),
        waited_text("//*[@data-automation='product-price']"),
        waited_text("//*[contains(@class,'price') and (self::div or self::span)]"),
    ];

    pub const RATING_AVERAGE: &[SelectorStrategy] = &[
        attr("//meta[@itemprop='ratingValue']", "content"),
        text("//*[contains(@class,'rating') and contains(@class,'average')]"),
    ];

    pub const RATING_COUNT: &[SelectorStrategy] = &[
        text("//span[@itemprop='ratingCount']"),
        text("//*[contains(.,'Review') and (self::span or self::div)]"),
    ];

    pub const DESCRIPTION: &[SelectorStrategy] = &[
        text("//*[@data-automation='long-description']"),
        text("//div[contains(@class,'productDescription')]"),
        text("//div[contains(@class,'description')]"),
        attr("//meta[@name='description']", "content"),
    ];
}

/// Expands the `{prefix}` placeholder in a URL template.
#[must_use]
pub fn with_prefix(template: &str, path_prefix: &str) -> String {
    template.replace("{prefix}", path_prefix)
}
