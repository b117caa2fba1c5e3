//! Configuration and per-invocation options
//!
//! Both wrap a JSON object. The engine never loads configuration itself; it
//! receives already-parsed values and only checks presence and type.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration key naming the project's root source directory
pub const ROOT_KEY: &str = "sourcePath";

/// Immutable key/value configuration shared by every generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: Map<String, Value>,
}

impl Configuration {
    /// Wrap a JSON object
    ///
    /// # Errors
    /// `GeneratorError::InvalidConfig` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(GeneratorError::InvalidConfig(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Raw value for a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for a key
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Root source directory, if configured
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.get_str(ROOT_KEY)
    }

    /// Keys from `required` that are absent or not strings, in order
    pub fn missing_keys<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for key in required {
            if self.get_str(key).is_none() && !missing.iter().any(|k| k == key) {
                missing.push(key.to_string());
            }
        }
        missing
    }
}

impl From<Map<String, Value>> for Configuration {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Options bound to one generator invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionBag {
    values: Map<String, Value>,
}

impl OptionBag {
    /// Create empty option bag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON object
    ///
    /// # Errors
    /// `GeneratorError::InvalidOption` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(GeneratorError::InvalidOption {
                key: String::from("<root>"),
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace one option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value; `null` counts as absent
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Whether the option is present
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Option rendered as text
    ///
    /// Strings come back as-is, scalars through their JSON form. Arrays and
    /// objects have no text form.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Keys from `required` that are absent, in order
    pub fn missing_keys<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        required
            .into_iter()
            .filter(|key| !self.contains(key))
            .map(str::to_string)
            .collect()
    }
}

impl From<Map<String, Value>> for OptionBag {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}
