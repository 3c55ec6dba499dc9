//! Field deserializers for optional backend fields.
//!
//! Each one reads the raw JSON value and coerces it, yielding `None` (or a
//! zero) when the value has the wrong shape. Only malformed JSON syntax is
//! an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text; numbers are rendered as text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "ignoring non-text value");
            None
        }
    })
}

/// Booleans, `1`/`0`, and `"true"`/`"false"`/`"yes"`/`"no"` strings.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Non-negative integer, from a number or a numeric string.
pub(crate) fn count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let n = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(n.and_then(|n| T::try_from(n).ok()))
}

/// Finite number, from a number or a numeric string; otherwise 0.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|f| f.is_finite()).unwrap_or(0.0))
}

/// Any value that fails to decode as `T` reads as absent.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => serde_json::from_value(value).ok(),
    })
}

/// Array whose undecodable elements are dropped. Non-arrays read as absent.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(
            values
                .into_iter()
                .filter_map(|value| match serde_json::from_value(value) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping malformed element");
                        None
                    }
                })
                .collect(),
        ),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "expected an array");
            None
        }
    })
}

/// [`items`], with absent reading as empty.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    items(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "count")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "number")]
        number: f64,
        #[serde(default, deserialize_with = "items")]
        items: Option<Vec<u8>>,
    }

    fn read(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(read(r#"{"text":"a"}"#).text.as_deref(), Some("a"));
        assert_eq!(read(r#"{"text":5}"#).text.as_deref(), Some("5"));
        assert_eq!(read(r#"{"text":{"x":1}}"#).text, None);
        assert_eq!(read(r#"{"text":null}"#).text, None);
    }

    #[test]
    fn test_flag_coercion() {
        assert_eq!(read(r#"{"flag":1}"#).flag, Some(true));
        assert_eq!(read(r#"{"flag":0}"#).flag, Some(false));
        assert_eq!(read(r#"{"flag":"True"}"#).flag, Some(true));
        assert_eq!(read(r#"{"flag":"no"}"#).flag, Some(false));
        assert_eq!(read(r#"{"flag":"maybe"}"#).flag, None);
        assert_eq!(read(r#"{"flag":[]}"#).flag, None);
    }

    #[test]
    fn test_count_coercion() {
        assert_eq!(read(r#"{"count":"12"}"#).count, Some(12));
        assert_eq!(read(r#"{"count":3.0}"#).count, Some(3));
        assert_eq!(read(r#"{"count":-1}"#).count, None);
        assert_eq!(read(r#"{"count":2.5}"#).count, None);
        assert_eq!(read(r#"{"count":5000000000}"#).count, None);
    }

    #[test]
    fn test_number_defaults_to_zero() {
        assert_eq!(read(r#"{"number":"4.5"}"#).number, 4.5);
        assert_eq!(read(r#"{"number":null}"#).number, 0.0);
        assert_eq!(read(r#"{"number":"five"}"#).number, 0.0);
    }

    #[test]
    fn test_items_drop_bad_elements() {
        assert_eq!(read(r#"{"items":[1,"x",300,2]}"#).items, Some(vec![1, 2]));
        assert_eq!(read(r#"{"items":"[1]"}"#).items, None);
        assert_eq!(read("{}").items, None);
    }
}
