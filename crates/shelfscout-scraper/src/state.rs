//! Best-effort reads over the page's client-rendering state tree.
//!
//! The in-page probes return plain JSON subtrees; all path resolution happens
//! here. Any missing segment, wrong-typed intermediate or `null` degrades to
//! "absent" instead of failing, and heterogeneous leaf values (numbers,
//! strings, `null`) are decoded into [`RawValue`] at this boundary so the rest
//! of the engine only sees canonical shapes.

use serde_json::{Number, Value};

/// Follows `path` through nested objects, returning `None` at the first
/// missing or non-object segment.
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, segment| node.as_object()?.get(*segment))
        .filter(|value| !value.is_null())
}

/// Resolves the first alias path whose value is a usable scalar.
///
/// Mirrors a chain of `a || b || c` in page script: `null`, `false`, `0`, the
/// empty string and non-scalar values are skipped in favor of the next alias.
#[must_use]
pub fn first_scalar<'a>(root: &'a Value, aliases: &[&[&str]]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|path| lookup(root, path))
        .find(|value| is_truthy_scalar(value))
}

/// Resolves the first alias path whose value is a non-empty object.
#[must_use]
pub fn first_object<'a>(root: &'a Value, aliases: &[&[&str]]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|path| lookup(root, path))
        .find(|value| value.as_object().is_some_and(|map| !map.is_empty()))
}

/// The array at `path`, or an empty slice when it is missing or not an array.
#[must_use]
pub fn array_at<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn is_truthy_scalar(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Bool(b) => *b,
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// A loosely-typed leaf value decoded once at the normalization boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Absent,
    Text(String),
    Number(Number),
}

impl RawValue {
    /// Decodes a JSON leaf. Booleans, arrays and objects carry no field data
    /// and decode as [`RawValue::Absent`].
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Number(n)) => Self::Number(n.clone()),
            _ => Self::Absent,
        }
    }

    /// Wraps DOM text, treating the empty string as absent.
    #[must_use]
    pub fn from_text(text: Option<String>) -> Self {
        match text {
            Some(s) if !s.trim().is_empty() => Self::Text(s),
            _ => Self::Absent,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Textual form: strings as-is, numbers in their JSON spelling
    /// (`59.99`, `123`), absent as the empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_follows_nested_objects() {
        let root = json!({"search": {"searchResult": {"products": [1, 2]}}});
        let products = lookup(&root, &["search", "searchResult", "products"]).unwrap();
        assert_eq!(products, &json!([1, 2]));
    }

    #[test]
    fn lookup_missing_segment_is_absent() {
        let root = json!({"search": {}});
        assert!(lookup(&root, &["search", "searchResult", "products"]).is_none());
    }

    #[test]
    fn lookup_through_non_object_is_absent() {
        let root = json!({"search": "oops"});
        assert!(lookup(&root, &["search", "searchResult"]).is_none());
        let root = json!({"search": null});
        assert!(lookup(&root, &["search", "searchResult"]).is_none());
    }

    #[test]
    fn lookup_null_leaf_is_absent() {
        let root = json!({"name": null});
        assert!(lookup(&root, &["name"]).is_none());
    }

    #[test]
    fn first_scalar_skips_falsy_aliases() {
        let root = json!({"priceWithoutEhf": null, "salePrice": "", "price": 0, "regular": 19.99});
        let value = first_scalar(
            &root,
            &[&["priceWithoutEhf"], &["salePrice"], &["price"], &["regular"]],
        );
        assert_eq!(value, Some(&json!(19.99)));
    }

    #[test]
    fn first_scalar_skips_objects() {
        let root = json!({"price": {"current": 10}, "salePrice": "9.99"});
        let value = first_scalar(&root, &[&["price"], &["salePrice"]]);
        assert_eq!(value, Some(&json!("9.99")));
    }

    #[test]
    fn first_object_prefers_earlier_alias() {
        let root = json!({"pdp": {"product": {"name": "Cam"}}, "product": {"name": "Other"}});
        let product = first_object(&root, &[&["pdp", "product"], &["product"]]).unwrap();
        assert_eq!(product["name"], "Cam");
    }

    #[test]
    fn array_at_missing_is_empty() {
        let root = json!({});
        assert!(array_at(&root, &["search", "searchResult", "products"]).is_empty());
    }

    #[test]
    fn raw_value_decodes_heterogeneous_leaves() {
        assert_eq!(RawValue::from_json(Some(&json!("4.5"))), RawValue::Text("4.5".into()));
        assert!(matches!(RawValue::from_json(Some(&json!(4.5))), RawValue::Number(_)));
        assert_eq!(RawValue::from_json(Some(&json!(null))), RawValue::Absent);
        assert_eq!(RawValue::from_json(Some(&json!(true))), RawValue::Absent);
        assert_eq!(RawValue::from_json(None), RawValue::Absent);
    }

    #[test]
    fn raw_value_numbers_keep_json_spelling() {
        assert_eq!(RawValue::from_json(Some(&json!(59.99))).to_text(), "59.99");
        assert_eq!(RawValue::from_json(Some(&json!(123))).to_text(), "123");
    }

    #[test]
    fn raw_value_blank_text_is_absent() {
        assert_eq!(RawValue::from_text(Some("  ".into())), RawValue::Absent);
        assert_eq!(RawValue::from_text(None), RawValue::Absent);
    }
}
