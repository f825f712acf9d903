//! Validation errors and the ordered result they are collected into.
//!
//! A [`ValidationResult`] is built once through an [`ErrorCollector`] and is
//! immutable afterwards. Entries keep detection order and are never
//! deduplicated: a field reported by two independent rules shows up twice.
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{ErrorCollector, ValidationError};
//!
//! let mut collector = ErrorCollector::new();
//! collector.push(ValidationError::new("namespace", "Namespace must not be blank."));
//! let result = collector.finish();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.to_json().unwrap(), r#"[{"key":"namespace","message":"Namespace must not be blank."}]"#);
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single blocking problem with the submitted settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Key of the offending field
    pub key: String,
    /// Human readable explanation
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Ordered outcome of validating one settings snapshot.
///
/// An empty result means the configuration is accepted. Serializes as a
/// bare JSON array of `{"key", "message"}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Returns `true` when no errors were detected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the errors in detection order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no errors were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over errors in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Serializes the result to the compact JSON array the host expects.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Append-only accumulator that produces a [`ValidationResult`].
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends `error` if present.
    pub fn push_opt(&mut self, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.push(error);
        }
    }

    /// Number of errors collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Freezes the collected errors into a result.
    #[must_use]
    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_is_valid() {
        let result = ErrorCollector::new().finish();
        assert!(result.is_valid());
        assert!(result.is_empty());
        assert_eq!(result.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut collector = ErrorCollector::new();
        collector.push(ValidationError::new("b", "second key first"));
        collector.push(ValidationError::new("a", "first key second"));
        let result = collector.finish();

        let keys: Vec<_> = result.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_collector_keeps_duplicates() {
        let mut collector = ErrorCollector::new();
        collector.push(ValidationError::new("oauth_token", "same"));
        collector.push(ValidationError::new("oauth_token", "same"));
        let result = collector.finish();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|e| e.key == "oauth_token"));
    }

    #[test]
    fn test_push_opt_skips_none() {
        let mut collector = ErrorCollector::new();
        collector.push_opt(None);
        assert!(collector.is_empty());

        collector.push_opt(Some(ValidationError::new("namespace", "bad")));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_result_serializes_as_array() {
        let mut collector = ErrorCollector::new();
        collector.push(ValidationError::new("go_server_url", "missing"));
        let json = collector.finish().to_json().unwrap();
        assert_eq!(json, r#"[{"key":"go_server_url","message":"missing"}]"#);
    }

    #[test]
    fn test_result_deserializes_from_array() {
        let result: ValidationResult =
            serde_json::from_str(r#"[{"key":"namespace","message":"bad"}]"#).unwrap();
        assert_eq!(result.errors(), &[ValidationError::new("namespace", "bad")]);
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new("namespace", "Namespace must not be blank.");
        assert_eq!(error.to_string(), "namespace: Namespace must not be blank.");
    }
}
