//! Submitted plugin settings.
//!
//! The host sends settings as a flat map of key to raw string. Values are
//! kept exactly as submitted; "blank" (absent, empty or whitespace only) is
//! decided at read time through [`PluginSettings::is_blank`].
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::PluginSettings;
//!
//! let body = r#"{"plugin-settings": {"namespace": {"value": "ci-agents"}}}"#;
//! let settings = PluginSettings::from_request_json(body).unwrap();
//!
//! assert_eq!(settings.get("namespace"), Some("ci-agents"));
//! assert!(settings.is_blank("oauth_token"));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Envelope key used by the host's validate request body.
const PLUGIN_SETTINGS_KEY: &str = "plugin-settings";

/// Raw key/value settings submitted by an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginSettings {
    values: HashMap<String, String>,
}

impl PluginSettings {
    /// Creates an empty settings map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value, returning the updated settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::PluginSettings;
    ///
    /// let settings = PluginSettings::new()
    ///     .with("authentication_strategy", "OAUTH_TOKEN")
    ///     .with("oauth_token", "secret");
    /// assert_eq!(settings.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value for `key`, if one was submitted.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is absent, empty, or whitespace only.
    #[must_use]
    pub fn is_blank(&self, key: &str) -> bool {
        is_blank(self.get(key))
    }

    /// Number of submitted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses a validate request body.
    ///
    /// Accepts either the host envelope
    /// `{"plugin-settings": {"key": {"value": "..."}}}` or a flat
    /// `{"key": "..."}` object. `null` values are treated as not submitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] for malformed JSON and
    /// [`Error::InvalidSettings`] when the document is not an object of
    /// string values.
    pub fn from_request_json(body: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(body)?;
        Self::from_value(document)
    }

    /// Builds settings from an already parsed JSON document.
    ///
    /// # Errors
    ///
    /// See [`PluginSettings::from_request_json`].
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(mut root) = document else {
            return Err(Error::InvalidSettings {
                reason: "expected a JSON object".to_string(),
            });
        };

        let entries = match root.remove(PLUGIN_SETTINGS_KEY) {
            Some(Value::Object(inner)) => inner,
            Some(_) => {
                return Err(Error::InvalidSettings {
                    reason: format!("'{PLUGIN_SETTINGS_KEY}' must be an object"),
                });
            }
            None => root,
        };

        let mut settings = Self::new();
        for (key, raw) in entries {
            if let Some(value) = extract_value(&key, raw)? {
                settings.insert(key, value);
            }
        }
        Ok(settings)
    }
}

impl FromIterator<(String, String)> for PluginSettings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for PluginSettings {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Returns `true` for absent, empty, or whitespace-only values.
///
/// # Examples
///
/// ```
/// use elastic_agent_core::is_blank;
///
/// assert!(is_blank(None));
/// assert!(is_blank(Some("  \t")));
/// assert!(!is_blank(Some("x")));
/// ```
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn extract_value(key: &str, raw: Value) -> Result<Option<String>> {
    match raw {
        Value::Null => Ok(None),
        Value::String(value) => Ok(Some(value)),
        Value::Object(mut wrapper) => match wrapper.remove("value") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(Error::InvalidSettings {
                reason: format!("value of '{key}' must be a string"),
            }),
        },
        _ => Err(Error::InvalidSettings {
            reason: format!("value of '{key}' must be a string"),
        }),
    }
}
