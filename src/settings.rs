//! Flat key/value settings snapshot shared with the host property UI.
//!
//! Mirrors the host's two-layer model: explicit values written by the user
//! and a defaults layer written once by the engine. Reads fall back from
//! value to default to a zero value, so missing keys never fail.

use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    values: Map<String, Value>,
    defaults: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integer value for `key`, falling back to the default layer, then 0.
    pub fn int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    /// String value for `key`, falling back to the default layer, then "".
    pub fn string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_int(&mut self, key: &str, v: i64) {
        self.values.insert(key.to_string(), Value::from(v));
    }

    pub fn set_string(&mut self, key: &str, v: &str) {
        self.values.insert(key.to_string(), Value::from(v));
    }

    /// Write a default for `key` unless one is already present.
    ///
    /// Defaults are only consulted when no explicit value exists, and are
    /// never overwritten once set.
    pub fn set_default_int(&mut self, key: &str, v: i64) {
        self.defaults
            .entry(key.to_string())
            .or_insert_with(|| Value::from(v));
    }

    /// True when neither a value nor a default exists for `key`.
    pub fn is_unset(&self, key: &str) -> bool {
        !self.values.contains_key(key) && !self.defaults.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).or_else(|| self.defaults.get(key))
    }
}
