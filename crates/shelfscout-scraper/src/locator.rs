//! XPath locators and their composition rules.
//!
//! Every element lookup in the engine is a page-level XPath expression. A
//! listing item is addressed as the n-th match of its container expression,
//! and item-relative locators (`.//...`, `./ancestor::...`, `..//...`) are
//! rewritten against that scope so the whole query stays one expression:
//!
//! ```text
//! scope:    (//div[contains(@class,'productItemTextContainer')])[3]
//! relative: .//div[contains(@class,'productItemName')]
//! joined:   (//div[contains(@class,'productItemTextContainer')])[3]//div[contains(@class,'productItemName')]
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Addresses the `index`-th (1-based) match of this locator.
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        Self(format!("({})[{index}]", self.0))
    }

    /// Resolves an item-relative expression against this locator as scope.
    ///
    /// Absolute expressions (starting with `/` or `(`) are returned unchanged.
    #[must_use]
    pub fn join(&self, relative: &str) -> Self {
        let joined = if relative.starts_with("..") {
            format!("{}/{relative}", self.0)
        } else if let Some(rest) = relative.strip_prefix('.') {
            format!("{}{rest}", self.0)
        } else if relative.starts_with('/') || relative.starts_with('(') {
            relative.to_owned()
        } else {
            format!("{}/{relative}", self.0)
        };
        Self(joined)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quotes `text` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so text containing both quote kinds is
/// spliced together with `concat()`.
#[must_use]
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    let parts: Vec<String> = text.split('\'').map(|part| format!("'{part}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Case-insensitive "string value contains `needle`" predicate over `.`.
///
/// `needle` must be lowercase ASCII.
#[must_use]
pub fn contains_text_ci(needle: &str) -> String {
    format!(
        "contains(translate(normalize-space(.), 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), {})",
        xpath_literal(needle)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &str = "//div[contains(@class,'productItemTextContainer')]";

    #[test]
    fn nth_wraps_expression() {
        let item = Locator::xpath(ITEMS).nth(3);
        assert_eq!(
            item.as_str(),
            "(//div[contains(@class,'productItemTextContainer')])[3]"
        );
    }

    #[test]
    fn join_descendant_relative() {
        let item = Locator::xpath(ITEMS).nth(1);
        let name = item.join(".//div[contains(@class,'productItemName')]");
        assert_eq!(
            name.as_str(),
            "(//div[contains(@class,'productItemTextContainer')])[1]//div[contains(@class,'productItemName')]"
        );
    }

    #[test]
    fn join_ancestor_axis() {
        let item = Locator::xpath("//li").nth(2);
        assert_eq!(
            item.join("./ancestor::a[1]").as_str(),
            "(//li)[2]/ancestor::a[1]"
        );
    }

    #[test]
    fn join_parent_relative() {
        let item = Locator::xpath("//li").nth(2);
        assert_eq!(item.join("..//a").as_str(), "(//li)[2]/..//a");
    }

    #[test]
    fn join_absolute_is_unchanged() {
        let item = Locator::xpath("//li").nth(2);
        assert_eq!(item.join("//h1").as_str(), "//h1");
    }

    #[test]
    fn xpath_literal_picks_quote_style() {
        assert_eq!(xpath_literal("show more"), "'show more'");
        assert_eq!(xpath_literal("don't"), "\"don't\"");
        assert_eq!(
            xpath_literal(r#"a'b"c"#),
            r#"concat('a', "'", 'b"c')"#
        );
    }
}
