//! In-page JavaScript used by the Chromium page controller.
//!
//! Every element lookup goes through `document.evaluate` so the same XPath
//! locators work in the live browser and in the in-memory fakes.

use serde_json::Value;

/// Result of [`click`] when the first match was clicked.
pub const CLICKED: &str = "clicked";
/// Result of [`click`] when nothing matched.
pub const MISSING: &str = "missing";
/// Result of [`click`] when the match is hidden, zero-sized or disabled.
pub const HIDDEN: &str = "hidden";

pub const SCROLL_HEIGHT: &str = "document.body ? document.body.scrollHeight : 0";
pub const SCROLL_TO_BOTTOM: &str =
    "window.scrollTo(0, document.body ? document.body.scrollHeight : 0)";

fn js_string(text: &str) -> String {
    Value::from(text).to_string()
}

fn first_node(xpath: &str) -> String {
    format!(
        "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
        js_string(xpath)
    )
}

pub fn count(xpath: &str) -> String {
    format!(
        "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
        js_string(xpath)
    )
}

pub fn text(xpath: &str) -> String {
    format!(
        "(() => {{ const n = {}; if (!n) return null; \
         const t = typeof n.innerText === 'string' ? n.innerText : n.textContent; \
         return t == null ? null : String(t); }})()",
        first_node(xpath)
    )
}

/// `href` reads the resolved property so relative links come back absolute.
pub fn attribute(xpath: &str, name: &str) -> String {
    let read = if name == "href" {
        "n.href || n.getAttribute('href')".to_owned()
    } else {
        format!("n.getAttribute({})", js_string(name))
    };
    format!(
        "(() => {{ const n = {}; if (!n) return null; const v = {read}; \
         return v == null ? null : String(v); }})()",
        first_node(xpath)
    )
}

pub fn click(xpath: &str) -> String {
    format!(
        "(() => {{ const n = {node}; if (!n) return '{MISSING}'; \
         const r = n.getBoundingClientRect(); const s = window.getComputedStyle(n); \
         if (n.disabled || r.width === 0 || r.height === 0 || s.visibility === 'hidden' || s.display === 'none') return '{HIDDEN}'; \
         n.scrollIntoView({{ block: 'center' }}); n.click(); return '{CLICKED}'; }})()",
        node = first_node(xpath)
    )
}
