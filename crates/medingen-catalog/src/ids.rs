//! Newtype IDs for type-safe identifiers.
//!
//! The backend uses integer primary keys but is not consistent about
//! sending them as numbers; ids also deserialize from numeric strings.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A backend primary key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from a raw key.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                lenient_key(deserializer).map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(ReviewId);
define_id!(SaltId);
define_id!(NotificationId);
define_id!(OfferId);

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match KeyRepr::deserialize(deserializer)? {
        KeyRepr::Int(id) => Ok(id),
        KeyRepr::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
        KeyRepr::Float(f) => Err(de::Error::custom(format!("non-integer id: {}", f))),
        KeyRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("non-numeric id: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_number_and_string() {
        let a: ProductId = serde_json::from_str("12").unwrap();
        let b: ProductId = serde_json::from_str("\"12\"").unwrap();
        let c: ProductId = serde_json::from_str("12.0").unwrap();
        assert_eq!(a, ProductId::new(12));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!(serde_json::from_str::<ProductId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<ProductId>("1.5").is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ReviewId::new(9)).unwrap(), "9");
    }

    #[test]
    fn test_id_display_and_parse() {
        let id: SaltId = " 31 ".parse().unwrap();
        assert_eq!(id.to_string(), "31");
    }
}
