//! Server-provided display configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message shown when the catalog is empty.
pub const NO_MEDICINES: &str = "error.no_medicines";
/// Message shown when the initial load fails.
pub const LOADING_FAILED: &str = "error.loading_failed";

pub const DEFAULT_NO_MEDICINES: &str =
    "No medicines found in database. Please contact administrator.";
pub const DEFAULT_LOADING_FAILED: &str =
    "Failed to load medicines from server. Please try again later.";

/// Key/value settings from `/config/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig(BTreeMap<String, Value>);

/// `/config/` answers `{ "config": {...} }`; some deployments send the map bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigPayload {
    Wrapped { config: BTreeMap<String, Value> },
    Flat(BTreeMap<String, Value>),
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `/config/` payload, accepting both the wrapped and bare shapes.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_value(payload)? {
            ConfigPayload::Wrapped { config } => Self(config),
            ConfigPayload::Flat(map) => Self(map),
        })
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Text for `key`, or `default` when absent, blank or not a scalar.
    pub fn text(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Entries whose key starts with `<category>.`.
    pub fn category(&self, category: &str) -> AppConfig {
        let prefix = format!("{}.", category);
        AppConfig(
            self.0
                .iter()
                .filter(|(k, _)| k.starts_with(&prefix))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
