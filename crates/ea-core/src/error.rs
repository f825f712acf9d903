//! Error types for elastic agent settings handling.
//!
//! These errors describe failures of the *machinery* around validation:
//! unparseable strategy names, malformed request bodies, catalog lookups.
//! Problems with the submitted settings themselves are never reported
//! through this type; they become [`ValidationError`] entries instead.
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{AuthenticationStrategy, Error};
//!
//! let err = "KERBEROS".parse::<AuthenticationStrategy>().unwrap_err();
//! assert!(err.is_unsupported_strategy());
//! ```
//!
//! [`ValidationError`]: crate::ValidationError

use thiserror::Error;

/// Main error type for the elastic agent settings crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication strategy value is not one of the known variants.
    ///
    /// The display text of this variant is what operators see when they
    /// submit an unrecognized strategy, so it names the accepted values.
    #[error("Unsupported authentication strategy '{value}'. Supported strategies are: {supported}.")]
    UnsupportedStrategy {
        /// The raw value that failed to parse
        value: String,
        /// Comma separated list of accepted strategy names
        supported: String,
    },

    /// A field key was looked up in a catalog that does not define it.
    #[error("Field '{key}' is not defined in the plugin settings catalog")]
    UnknownField {
        /// Key that was not found
        key: String,
    },

    /// Settings payload has an unexpected shape.
    ///
    /// Raised when a request body is valid JSON but does not describe a
    /// flat set of string settings.
    #[error("Invalid plugin settings: {reason}")]
    InvalidSettings {
        /// Description of the problem
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is an unsupported strategy error.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::Error;
    ///
    /// let err = Error::UnsupportedStrategy {
    ///     value: "BASIC".to_string(),
    ///     supported: "OAUTH_TOKEN".to_string(),
    /// };
    /// assert!(err.is_unsupported_strategy());
    /// ```
    #[must_use]
    pub const fn is_unsupported_strategy(&self) -> bool {
        matches!(self, Self::UnsupportedStrategy { .. })
    }

    /// Returns `true` if this is an unknown field error.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::Error;
    ///
    /// let err = Error::UnknownField {
    ///     key: "oauth_token".to_string(),
    /// };
    /// assert!(err.is_unknown_field());
    /// ```
    #[must_use]
    pub const fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Returns `true` if this is an invalid settings error.
    #[must_use]
    pub const fn is_invalid_settings(&self) -> bool {
        matches!(self, Self::InvalidSettings { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for elastic agent operations.
///
/// # Examples
///
/// ```
/// use elastic_agent_core::{Error, Result};
///
/// fn require_key(key: &str) -> Result<&str> {
///     if key.is_empty() {
///         return Err(Error::InvalidArgument("key cannot be empty".to_string()));
///     }
///     Ok(key)
/// }
///
/// assert!(require_key("namespace").is_ok());
/// assert!(require_key("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
