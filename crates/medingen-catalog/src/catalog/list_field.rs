//! Array-or-JSON-string list fields.
//!
//! `uses`, `side_effects` and `faq_content` arrive either as arrays or as a
//! string holding a JSON-encoded array. [`ListField`] captures both shapes at
//! the record boundary and [`normalize_list`] is the single place that turns
//! them into a plain `Vec`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Which default to substitute when a list field is absent or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Substitute an empty list.
    #[default]
    Empty,
    /// Substitute a single human-readable placeholder entry.
    Placeholder,
}

/// A list as the backend may encode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField<T> {
    Items(Vec<T>),
    Encoded(String),
    Malformed(serde_json::Value),
}

impl<T> ListField<T> {
    pub fn items(items: Vec<T>) -> Self {
        ListField::Items(items)
    }

    pub fn encoded(json: impl Into<String>) -> Self {
        ListField::Encoded(json.into())
    }
}

/// Normalize a list field, substituting `fallback()` when the field is
/// absent, blank, or does not decode to a list of `T`.
pub fn normalize_list<T, F>(name: &str, field: Option<&ListField<T>>, fallback: F) -> Vec<T>
where
    T: Clone + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match field {
        None => fallback(),
        Some(ListField::Items(items)) => items.clone(),
        Some(ListField::Encoded(text)) if text.trim().is_empty() => fallback(),
        Some(ListField::Encoded(text)) => match serde_json::from_str::<Vec<T>>(text) {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!(field = name, error = %e, "list field is not a JSON array, using default");
                fallback()
            }
        },
        Some(ListField::Malformed(value)) => {
            tracing::debug!(field = name, value = %value, "unexpected list field shape, using default");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_native_array_kept() {
        let field: ListField<String> = serde_json::from_str(r#"["Fever","Pain"]"#).unwrap();
        assert_eq!(normalize_list("uses", Some(&field), none), vec!["Fever", "Pain"]);
    }

    #[test]
    fn test_json_string_decoded() {
        let field: ListField<String> = serde_json::from_str(r#""[\"Nausea\"]""#).unwrap();
        assert!(matches!(field, ListField::Encoded(_)));
        assert_eq!(normalize_list("side_effects", Some(&field), none), vec!["Nausea"]);
    }

    #[test]
    fn test_invalid_json_string_uses_fallback() {
        let field = ListField::<String>::encoded("[not json");
        let out = normalize_list("side_effects", Some(&field), || vec!["n/a".to_string()]);
        assert_eq!(out, vec!["n/a"]);
    }

    #[test]
    fn test_absent_and_blank_use_fallback() {
        assert!(normalize_list::<String, _>("uses", None, none).is_empty());
        let blank = ListField::<String>::encoded("  ");
        assert!(normalize_list("uses", Some(&blank), none).is_empty());
    }

    #[test]
    fn test_wrong_shape_uses_fallback() {
        let field: ListField<String> = serde_json::from_str(r#"{"a":1}"#).unwrap();
        assert!(matches!(field, ListField::Malformed(_)));
        assert!(normalize_list("uses", Some(&field), none).is_empty());

        // A JSON string that decodes to an object is still not a list
        let field = ListField::<String>::encoded(r#"{"a":1}"#);
        assert!(normalize_list("uses", Some(&field), none).is_empty());
    }
}
