//! Field descriptors and their single-field validation rules.
//!
//! Every known setting is described by a [`FieldDescriptor`]: its key, the
//! name shown to operators, presentation metadata, and a [`FieldRule`] that
//! looks at that one value in isolation. Rules never see other fields.
//!
//! # Examples
//!
//! ```
//! use elastic_agent_core::{FieldDescriptor, FieldRule};
//!
//! let field = FieldDescriptor::new("pending_pods_count", "Maximum pending pods", FieldRule::PositiveInteger { required: true });
//!
//! assert!(field.validate(Some("10")).is_none());
//!
//! let error = field.validate(Some("-1")).unwrap();
//! assert_eq!(error.key, "pending_pods_count");
//! assert_eq!(error.message, "Maximum pending pods must be a positive integer.");
//! ```

use crate::ValidationError;
use crate::settings::is_blank;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

/// RFC 1123 label, as required for namespace names.
static KUBERNETES_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

/// Maximum length of an RFC 1123 label.
const KUBERNETES_NAME_MAX_LEN: usize = 63;

/// Validation rule applied to one field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Any value, including blank, is accepted.
    Any,
    /// Value must not be blank.
    Required,
    /// Value must parse as an integer greater than zero.
    PositiveInteger {
        /// Whether a blank value is rejected
        required: bool,
    },
    /// Blank, or an absolute `https` URL.
    HttpsUrl,
    /// Blank, or an `https` URL whose path ends with `/go`.
    GoServerUrl,
    /// Blank, or an RFC 1123 label such as a namespace name.
    KubernetesName,
}

impl FieldRule {
    /// Checks `value` and returns the error message if it is rejected.
    ///
    /// Values are trimmed before inspection. `display_name` is used to
    /// build the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use elastic_agent_core::FieldRule;
    ///
    /// assert_eq!(FieldRule::Required.check("Namespace", Some(" ")).as_deref(), Some("Namespace must not be blank."));
    /// assert_eq!(FieldRule::HttpsUrl.check("Cluster URL", None), None);
    /// ```
    #[must_use]
    pub fn check(&self, display_name: &str, value: Option<&str>) -> Option<String> {
        if is_blank(value) {
            return match self {
                Self::Required | Self::PositiveInteger { required: true } => {
                    Some(format!("{display_name} must not be blank."))
                }
                _ => None,
            };
        }
        let value = value.unwrap_or_default().trim();

        match self {
            Self::Any | Self::Required => None,
            Self::PositiveInteger { .. } => match value.parse::<u64>() {
                Ok(n) if n > 0 => None,
                _ => Some(format!("{display_name} must be a positive integer.")),
            },
            Self::HttpsUrl => parse_https_url(value)
                .is_none()
                .then(|| https_url_message(display_name)),
            Self::GoServerUrl => match parse_https_url(value) {
                None => Some(https_url_message(display_name)),
                Some(url) if !has_go_context_path(&url) => Some(format!(
                    "{display_name} must be in format https://<GO_SERVER_URL>:<GO_SERVER_PORT>/go."
                )),
                Some(_) => None,
            },
            Self::KubernetesName => {
                let valid = value.len() <= KUBERNETES_NAME_MAX_LEN
                    && KUBERNETES_NAME_REGEX.is_match(value);
                (!valid).then(|| {
                    format!(
                        "{display_name} must be a valid Kubernetes name (lowercase alphanumeric characters or '-', at most {KUBERNETES_NAME_MAX_LEN} characters)."
                    )
                })
            }
        }
    }
}

fn parse_https_url(value: &str) -> Option<Url> {
    Url::parse(value)
        .ok()
        .filter(|url| url.scheme() == "https" && url.host_str().is_some())
}

fn has_go_context_path(url: &Url) -> bool {
    let path = url.path();
    path.strip_suffix('/').unwrap_or(path).ends_with("/go")
}

fn https_url_message(display_name: &str) -> String {
    format!("{display_name} must be a valid HTTPs URL (https://example.com).")
}

/// Static description of one configurable setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    key: String,
    display_name: String,
    rule: FieldRule,
    default_value: Option<String>,
    required: bool,
    secure: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor with no default, not required, not secure.
    #[must_use]
    pub fn new(key: impl Into<String>, display_name: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            rule,
            default_value: None,
            required: false,
            secure: false,
        }
    }

    /// Sets the value pre-filled in the settings form.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Marks the field as required in the settings form.
    ///
    /// This only affects presentation metadata; whether blank is accepted
    /// during validation is decided by the [`FieldRule`].
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Marks the field as secret so the host masks it.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Settings key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name shown to operators.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Applies this field's rule to `value`.
    #[must_use]
    pub fn validate(&self, value: Option<&str>) -> Option<ValidationError> {
        self.rule
            .check(&self.display_name, value)
            .map(|message| ValidationError::new(self.key.clone(), message))
    }

    /// Presentation metadata at position `display_order`.
    #[must_use]
    pub fn metadata(&self, display_order: usize) -> FieldMetadata {
        FieldMetadata {
            display_name: self.display_name.clone(),
            default_value: self.default_value.clone(),
            required: self.required,
            secure: self.secure,
            display_order: display_order.to_string(),
        }
    }
}

/// Presentation metadata for one field, as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FieldMetadata {
    /// Name shown to operators
    pub display_name: String,
    /// Pre-filled value
    pub default_value: Option<String>,
    /// Whether the form marks the field as required
    pub required: bool,
    /// Whether the value is masked
    pub secure: bool,
    /// Position in the form
    pub display_order: String,
}
